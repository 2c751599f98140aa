use ::scraper::Selector;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::WeightClass;
use crate::scraper::{self, absolute_url, build_url};

const RESULTS_TABLE_SELECTOR: &str = "body > div.container > div:nth-child(3) > div.col_left > \
     section:nth-child(2) > div > div.content.table > table";

/// Run one fight finder search and return the absolute profile URLs it lists.
///
/// `text` is the free-text query (name, optionally followed by the nickname).
#[instrument(skip(client))]
pub(crate) async fn search_fighters(
    client: &reqwest::Client,
    base_url: &str,
    text: &str,
    weight: Option<WeightClass>,
) -> Result<Vec<String>> {
    let mut params = vec![("SearchTxt", text.to_string())];
    if let Some(weight) = weight {
        params.push(("weight", weight.filter_code().to_string()));
    }
    let url = build_url(base_url, "/stats/fightfinder", &params)?;
    let document = scraper::get_document(client, url.as_str()).await?;
    let candidates = parse_candidates(&document)?
        .iter()
        .map(|href| absolute_url(base_url, href))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = candidates.len(), "parsed search candidates");
    Ok(candidates)
}

/// Every link inside the search results table. A page without the table has no candidates.
pub(crate) fn parse_candidates(document: &scraper::Html) -> Result<Vec<String>> {
    let table_selector = Selector::parse(RESULTS_TABLE_SELECTOR)?;
    let link_selector = Selector::parse("a")?;
    let Some(table) = document.select(&table_selector).next() else {
        return Ok(Vec::new());
    };
    Ok(table
        .select(&link_selector)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fight finder results page listing the given profile paths.
    fn results_page(hrefs: &[&str]) -> String {
        let rows: String = hrefs
            .iter()
            .map(|href| format!("<tr><td><a href=\"{href}\">Fighter</a></td><td>Nick</td></tr>"))
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
          <tr class="table_head"><td>Name</td><td>Nickname</td></tr>
          {rows}
        </table></div></div>
      </section>
    </div>
  </div>
</div>
</body></html>"#
        )
    }

    #[test]
    fn test_parse_single_candidate() {
        let document = scraper::Html::parse_document(&results_page(&["/fighter/Jon-Jones-27944"]));
        let candidates = parse_candidates(&document).unwrap();
        assert_eq!(candidates, vec!["/fighter/Jon-Jones-27944".to_string()]);
    }

    #[test]
    fn test_parse_multiple_candidates() {
        let document = scraper::Html::parse_document(&results_page(&[
            "/fighter/Steve-Garcia-23456",
            "/fighter/Steve-Garcia-78901",
        ]));
        assert_eq!(parse_candidates(&document).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_results_table_means_no_candidates() {
        let document =
            scraper::Html::parse_document("<html><body><div class=\"container\"></div></body></html>");
        assert!(parse_candidates(&document).unwrap().is_empty());
    }
}
