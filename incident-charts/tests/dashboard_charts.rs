use incident_charts::{
    init_chart, update_chart, CategorySeries, ChartHandle, ChartKind, InMemoryBackend,
    CURATED_COLORS,
};
use serde_json::json;

fn series(entries: &[(&str, u64)]) -> CategorySeries {
    let mut series = CategorySeries::new();
    for (label, value) in entries {
        series.push(*label, *value).unwrap();
    }
    series
}

#[test]
fn test_page_with_some_canvases_missing() {
    let backend = InMemoryBackend::new()
        .with_canvas("sectorChart")
        .with_canvas("severityChart");
    let empty = CategorySeries::new();

    let sector = init_chart(&backend, "sectorChart", ChartKind::Sector.build(&empty));
    let severity = init_chart(&backend, "severityChart", ChartKind::Severity.build(&empty));
    let actor = init_chart(&backend, "actorChart", ChartKind::Actor.build(&empty));

    assert!(sector.is_some());
    assert!(severity.is_some());
    assert!(actor.is_none());
}

#[test]
fn test_sector_chart_json_shape() {
    let config = ChartKind::Sector.build(&series(&[("Finance", 3), ("Energy", 1)]));
    let value = config.to_json().unwrap();

    assert_eq!(value["type"], "pie");
    assert_eq!(value["data"]["labels"], json!(["Finance", "Energy"]));
    assert_eq!(value["data"]["datasets"][0]["data"], json!([3.0, 1.0]));
    assert_eq!(
        value["data"]["datasets"][0]["backgroundColor"],
        json!([CURATED_COLORS[0], CURATED_COLORS[1]])
    );
    assert_eq!(value["options"]["responsive"], true);
    assert_eq!(value["options"]["maintainAspectRatio"], false);
    assert_eq!(value["options"]["plugins"]["legend"]["position"], "right");
    assert_eq!(value["options"]["plugins"]["title"]["text"], "Incidents by Sector");
}

#[test]
fn test_severity_chart_colors_follow_labels() {
    let config = ChartKind::Severity.build(&series(&[("Low", 5), ("Critical", 2), ("Odd", 1)]));
    let value = config.to_json().unwrap();

    assert_eq!(value["type"], "doughnut");
    assert_eq!(
        value["data"]["datasets"][0]["backgroundColor"],
        json!(["#28a745", "#dc3545", "#6c757d"])
    );
}

#[test]
fn test_actor_chart_is_horizontal() {
    let value = ChartKind::Actor
        .build(&series(&[("APT1", 4)]))
        .to_json()
        .unwrap();

    assert_eq!(value["type"], "bar");
    assert_eq!(value["options"]["indexAxis"], "y");
    assert_eq!(value["options"]["plugins"]["legend"]["display"], false);
}

#[test]
fn test_fetched_data_replaces_initial_series() {
    let backend = InMemoryBackend::new().with_canvas("severityChart");
    let config = ChartKind::Severity.build(&series(&[("High", 1)]));
    let mut chart = init_chart(&backend, "severityChart", config).unwrap();

    update_chart(
        &mut chart,
        vec!["Critical".to_string(), "Medium".to_string()],
        vec![3.0, 1.0],
    );

    assert_eq!(chart.config().data.labels, vec!["Critical", "Medium"]);
    assert_eq!(chart.config().primary_data(), &[3.0, 1.0]);
    assert_eq!(
        chart.config().tooltip_text(0).as_deref(),
        Some("Critical: 3 (75%)")
    );
    assert_eq!(chart.redraw_count(), 1);
}
