use costmap_core::prelude::*;
use costmap_core::Threshold;

fn dashboard() -> Dashboard {
    Dashboard::new(Dataset::load_default().unwrap())
}

#[test]
fn selecting_a_metric_recomputes_the_map() {
    let mut dash = dashboard();
    let view = dash.select_metric(Metric::Income).unwrap();

    assert_eq!(dash.metric(), Metric::Income);
    assert_eq!(view.title, "Income Index (relative to U.S.)");
    assert_eq!(view.fills.len(), dash.dataset().features().len());

    for fill in &view.fills {
        assert_eq!(fill.color, view.scale.color_for(fill.value));
    }
    let greenland = view.fills.iter().find(|f| f.admin == "Greenland").unwrap();
    assert_eq!(greenland.value, None);
    assert_eq!(greenland.color, NO_DATA_COLOR);
}

#[test]
fn switching_policy_keeps_the_legend_in_sync() {
    let mut dash = dashboard();
    let view = dash.select_policy(ColorPolicy::Sequential).unwrap();

    assert_eq!(view.scale.policy(), ColorPolicy::Sequential);
    assert_eq!(view.legend, view.scale.legend());
}

#[test]
fn selecting_a_pair_stores_resolved_names() {
    let mut dash = dashboard();
    let cmp = dash.select_pair("canada", "FRANCE").unwrap();

    assert_eq!(cmp.a, "Canada");
    assert_eq!(dash.selected_pair(), Some(("Canada", "France")));
    assert!(dash.comparison().unwrap().is_ok());

    assert!(dash.select_pair("Canada", "Narnia").is_err());
    assert_eq!(dash.selected_pair(), Some(("Canada", "France")));
}

#[test]
fn scatter_uses_income_against_cost() {
    let dash = dashboard();
    let scatter = dash.scatter();

    assert_eq!(scatter.points.len(), 15);
    let fit = scatter.fit.as_ref().unwrap();
    assert_eq!(fit.slope, (fit.slope * 100.0).round() / 100.0);
    assert!(fit.label.starts_with("y = "));
    let canada = scatter.points.iter().find(|p| p.name == "Canada").unwrap();
    assert_eq!((canada.x, canada.y), (90.0, 85.0));
    assert_eq!(canada.region, Some(Region::NorthAmerica));
}

#[test]
fn table_orders() {
    let dash = dashboard();

    let by_cost = dash.table(SortOrder::Metric(Metric::Cost));
    assert_eq!(by_cost[0].name, "Switzerland");
    assert_eq!(by_cost.last().unwrap().name, "Egypt");

    let by_ppi = dash.table(SortOrder::Metric(Metric::PurchasingPower));
    assert_eq!(by_ppi.last().unwrap().name, "Curacao");

    let by_name = dash.table(SortOrder::Name);
    assert_eq!(by_name[0].name, "Australia");
}

#[test]
fn ranking_skips_rows_without_data() {
    let ds = Dataset::load_default().unwrap();
    let ranked = ds.ranked(Metric::Income);

    assert_eq!(ranked[0].rank, Some(1));
    assert_eq!(ranked[0].record.name, "Switzerland");
    let last = ranked.last().unwrap();
    assert_eq!(last.record.name, "Curacao");
    assert_eq!(last.rank, None);
    assert_eq!(ranked[ranked.len() - 2].rank, Some(15));
}

#[test]
fn threshold_query() {
    let ds = Dataset::load_default().unwrap();

    let rich: Vec<&str> = ds
        .query(Metric::Income, Threshold::Above, 100.0)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(rich, vec!["Switzerland", "Australia"]);

    let cheap = ds.query(Metric::Cost, Threshold::Below, 25.0);
    assert_eq!(cheap.len(), 2);
}

#[test]
fn rebasing_on_a_benchmark_country() {
    let ds = Dataset::load_default().unwrap();
    let rebased = ds.rebased("France").unwrap();

    let france = rebased.country("France").unwrap();
    assert_eq!(france.indices, Indices::new(Some(100.0), Some(100.0), Some(100.0)));
    let usa = rebased.country("United States of America").unwrap();
    assert!((usa.cost_index().unwrap() - 125.0).abs() < 1e-9);
    assert_eq!(rebased.stats().matched, ds.stats().matched);

    assert!(ds.rebased("Narnia").is_err());
}
