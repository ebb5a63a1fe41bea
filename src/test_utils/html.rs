use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The trimmed text of the first element matching `selector`.
#[track_caller]
pub(crate) fn select_text(html: &Html, selector: &str) -> String {
    let parsed = Selector::parse(selector).unwrap();

    html.select(&parsed)
        .next()
        .unwrap_or_else(|| panic!("No element matches {selector:?}"))
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}

/// The trimmed text of every element matching `selector`, in document order.
pub(crate) fn select_all_text(html: &Html, selector: &str) -> Vec<String> {
    let parsed = Selector::parse(selector).unwrap();

    html.select(&parsed)
        .map(|element| element.text().collect::<String>().trim().to_owned())
        .collect()
}

/// The inline error shown for the form field `name`, if any.
pub(crate) fn field_error(html: &Html, name: &str) -> Option<String> {
    let parsed = Selector::parse(&format!("[data-error-for={name}]")).unwrap();

    html.select(&parsed)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_owned())
}
