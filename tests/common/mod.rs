#![allow(dead_code)]

use sherdog_scraper::{ScraperConfig, SherdogClient};
use wiremock::MockServer;

/// A client whose Sherdog and UFC roots both point at the mock server.
pub fn client_for(server: &MockServer) -> SherdogClient {
    let config = ScraperConfig::default()
        .with_sherdog_base_url(&server.uri())
        .with_ufc_base_url(&server.uri())
        .with_max_concurrency(4);
    SherdogClient::from_config(config).expect("failed to build client")
}

/// A fight finder results page listing the given profile paths.
pub fn search_results_html(hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| format!("<tr><td><a href=\"{href}\">Fighter</a></td></tr>"))
        .collect();
    format!(
        r#"<html><body>
<div class="header"></div>
<div class="container">
  <div class="nav"></div>
  <div class="ad"></div>
  <div class="main">
    <div class="col_left">
      <section class="intro"></section>
      <section class="results">
        <div><div class="content table"><table>
          <tr class="table_head"><td>Name</td></tr>
          {rows}
        </table></div></div>
      </section>
    </div>
  </div>
</div>
</body></html>"#
    )
}

/// A profile page with a two-fight professional history.
pub fn profile_html(name: &str) -> String {
    format!(
        r#"<html><body>
<div class="module bio_fighter vcard">
  <span class="fn">{name}</span>
  <span class="nickname">"<em>Bones</em>"</span>
  <span itemprop="birthDate">1987-07-19</span>
  <span class="locality">Rochester, New York</span>
  <strong itemprop="nationality">United States</strong>
  <strong itemprop="height">6'4"</strong>
  <strong itemprop="weight">248 lbs</strong>
  <strong class="title">Heavyweight</strong>
  <span class="counter">27</span><span class="counter">1</span>
  <a class="association" href="/gym/jackson-wink"><span itemprop="name">Jackson Wink MMA</span></a>
</div>
<div class="module fight_history">
  <div class="module_header"><h2>Fight History - Pro</h2></div>
  <div class="content table"><table>
    <tr class="table_head"><td>Result</td><td>Fighter</td><td>Event</td><td>Method/Referee</td><td>R</td><td>Time</td></tr>
    <tr>
      <td><span class="final_result win">win</span></td>
      <td><a href="/fighter/Ciryl-Gane-276413">Ciryl Gane</a></td>
      <td><a href="/events/UFC-285-96207">UFC 285</a><br><span class="sub_line">Mar / 04 / 2023</span></td>
      <td>Submission (Guillotine Choke)<br><span class="sub_line">Marc Goddard</span></td>
      <td>1</td>
      <td>2:04</td>
    </tr>
    <tr>
      <td><span class="final_result win">win</span></td>
      <td><a href="/fighter/Dominick-Reyes-145161">Dominick Reyes</a></td>
      <td><a href="/events/UFC-247-83781">UFC 247</a><br><span class="sub_line">Feb / 08 / 2020</span></td>
      <td>Decision (Unanimous)<br><span class="sub_line">Marc Goddard</span></td>
      <td>5</td>
      <td>5:00</td>
    </tr>
  </table></div>
</div>
</body></html>"#
    )
}

/// A roster listing page with `count` athletes.
pub fn roster_page_html(prefix: &str, count: usize) -> String {
    let entries: String = (0..count)
        .map(|i| {
            format!(
                r#"<div class="c-listing-athlete__text">
  <span class="c-listing-athlete__nickname"><div>"Nick {i}"</div></span>
  <span class="c-listing-athlete__name">{prefix} {i}</span>
  <span class="c-listing-athlete__title"><div class="field__item">Lightweight</div></span>
</div>"#
            )
        })
        .collect();
    format!("<html><body><div class=\"view-items\">{entries}</div></body></html>")
}
