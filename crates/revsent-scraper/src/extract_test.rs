use super::*;

fn extractor() -> ReviewExtractor {
    ReviewExtractor::new(&SiteProfile::default()).expect("default profile compiles")
}

fn texts(reviews: &[Review]) -> Vec<&str> {
    reviews.iter().map(Review::text).collect()
}

#[test]
fn no_containers_yields_none() {
    let html = "<html><body><div class='other'>nothing here</div></body></html>";
    assert_eq!(extractor().extract(html), None);
}

#[test]
fn extracts_primary_text_from_unclassed_div() {
    let html = r#"
        <div class="ZmyHeo"><div class="stars">5</div><div>Loved the strap</div></div>
        <div class="ZmyHeo"><div class="">Battery died in a week</div></div>
    "#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(
        texts(&reviews),
        vec!["Loved the strap", "Battery died in a week"]
    );
}

#[test]
fn first_matching_selector_wins_over_later_ones() {
    let html = r#"
        <div class="t-ZTKy"><div>from the third marker</div></div>
        <div class="ZmyHeo"><div>from the first marker</div></div>
        <div class="_11pzQk"><div>from the second marker</div></div>
    "#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(texts(&reviews), vec!["from the first marker"]);
}

#[test]
fn falls_back_to_next_selector_when_earlier_ones_miss() {
    let html = r#"
        <div class="t-ZTKy"><div>third one</div></div>
        <div class="_11pzQk"><div>second one</div></div>
    "#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(texts(&reviews), vec!["second one"]);
}

#[test]
fn appends_read_more_text() {
    let html = r#"
        <div class="ZmyHeo">
          <div>Good watch but</div>
          <span class="wTYmpv">the dial scratches easily</span>
        </div>
    "#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(
        texts(&reviews),
        vec!["Good watch but the dial scratches easily"]
    );
}

#[test]
fn falls_back_to_container_text_without_text_element() {
    let html = r#"<div class="ZmyHeo"><span>Nice</span> <p class="x">value for money</p></div>"#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(texts(&reviews), vec!["Nice value for money"]);
}

#[test]
fn read_more_alone_is_not_used_as_primary_text() {
    // Without a primary text element the whole container is used instead.
    let html = r#"<div class="ZmyHeo"><span class="wTYmpv">READ MORE</span></div>"#;
    assert_eq!(extractor().extract(html), Some(Vec::new()));
}

#[test]
fn discards_placeholder_case_sensitively() {
    let html = r#"
        <div class="ZmyHeo"><div>READ MORE</div></div>
        <div class="ZmyHeo"><div>Read More</div></div>
    "#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(texts(&reviews), vec!["Read More"]);
}

#[test]
fn discards_empty_containers() {
    let html = r#"
        <div class="ZmyHeo"><div>   </div></div>
        <div class="ZmyHeo"></div>
        <div class="ZmyHeo"><div>kept</div></div>
    "#;
    let reviews = extractor().extract(html).expect("containers matched");
    assert_eq!(texts(&reviews), vec!["kept"]);
}

#[test]
fn invalid_selector_is_reported() {
    let profile = SiteProfile {
        review_containers: vec!["div[".to_string()],
        ..SiteProfile::default()
    };
    let err = ReviewExtractor::new(&profile).err().expect("should fail");
    assert!(matches!(err, ScraperError::Selector { ref selector, .. } if selector == "div["));
}

#[test]
fn metrics_from_summary_span() {
    let html = r#"<span class="Wphh3N"><span>12,345 Ratings&nbsp;&amp;</span> <span>1,234 Reviews</span></span>"#;
    let metrics = MetricsExtractor::new(&SiteProfile::default())
        .unwrap()
        .extract(html);
    assert_eq!(metrics.ratings_count, Some(12_345));
    assert_eq!(metrics.reviews_count, Some(1_234));
}

#[test]
fn metrics_missing_summary_is_none() {
    let metrics = MetricsExtractor::new(&SiteProfile::default())
        .unwrap()
        .extract("<html><body><span>9 ratings</span></body></html>");
    assert_eq!(metrics, ProductMetrics::default());
}

#[test]
fn parse_metrics_handles_lakh_grouping() {
    let metrics = parse_metrics_text("1,23,456 ratings and 7,890 reviews");
    assert_eq!(metrics.ratings_count, Some(123_456));
    assert_eq!(metrics.reviews_count, Some(7_890));
    assert_eq!(metrics.ratings_display.as_deref(), Some("1,23,456"));
    assert_eq!(metrics.reviews_display.as_deref(), Some("7,890"));
}

#[test]
fn parse_metrics_partial() {
    let metrics = parse_metrics_text("532 ratings");
    assert_eq!(metrics.ratings_count, Some(532));
    assert_eq!(metrics.reviews_count, None);
    assert_eq!(metrics.ratings_display.as_deref(), Some("532"));
    assert_eq!(metrics.reviews_display, None);
}
