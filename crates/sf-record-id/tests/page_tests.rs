//! Page snapshot and source cascade integration tests

use sf_record_id::{
    locate, scan_from_element, scan_page, ContextSources, Origin, PageSnapshot, ScanLimits,
};

const ACCOUNT_ID_18: &str = "0018c00002NIZJIAA5";
const USER_ID_18: &str = "005fj000007W4pFAAS";

fn load_fixture() -> PageSnapshot {
    PageSnapshot::from_json(include_str!("fixtures/account_page.json")).unwrap()
}

#[test]
fn test_record_link_preferred_over_earlier_text() {
    let page = load_fixture();
    assert_eq!(scan_page(&page, &ScanLimits::default()).unwrap(), ACCOUNT_ID_18);
}

#[test]
fn test_document_order_without_preferred_elements() {
    let mut page = load_fixture();
    let body = page.body.as_mut().unwrap();
    body.children[1].children[1].attributes.remove("href");
    body.children[1].children[1]
        .attributes
        .insert("data-label".to_string(), ACCOUNT_ID_18.to_string());

    assert_eq!(scan_page(&page, &ScanLimits::default()).unwrap(), USER_ID_18);
}

#[test]
fn test_target_element_inside_record() {
    let page = load_fixture();
    let body = page.body.as_ref().unwrap();

    // span, article and body carry no id
    assert!(scan_from_element(body, &[1, 0], &ScanLimits::default()).is_none());
    assert_eq!(
        scan_from_element(body, &[1, 1], &ScanLimits::default()).unwrap(),
        ACCOUNT_ID_18
    );
}

#[test]
fn test_locate_reports_origin() {
    let page = load_fixture();
    let sources = ContextSources {
        page_url: page.location.clone(),
        target_element: Some(vec![0, 0]),
        ..Default::default()
    };

    let located = locate(&sources, Some(&page), &ScanLimits::default()).unwrap();
    assert_eq!(located.id, USER_ID_18);
    assert_eq!(located.origin, Origin::TargetElement);

    let json = serde_json::to_string(&located).unwrap();
    assert_eq!(
        json,
        format!(r#"{{"id":"{USER_ID_18}","origin":"target-element"}}"#)
    );
}

#[test]
fn test_sources_deserialize_with_missing_fields() {
    let sources: ContextSources =
        serde_json::from_str(r#"{"selection_text": "0018c00002NIZJIAA5"}"#).unwrap();
    let located = locate(&sources, None, &ScanLimits::default()).unwrap();
    assert_eq!(located.origin, Origin::Selection);
}
