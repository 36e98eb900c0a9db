use costmap_core::compare::relative_delta;
use costmap_core::loader::parse_rows;
use costmap_core::prelude::*;

const TABLE: &str = "\
Country,costIndex,incomeIndex,PPI
Canada,85,90,105.9
France,80,70,87.5
";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-4
}

fn record(name: &str, cost: Option<f64>, income: Option<f64>, ppi: Option<f64>) -> CountryRecord {
    CountryRecord::new(name, Indices::new(cost, income, ppi))
}

#[test]
fn canada_against_france() {
    let rows = parse_rows(TABLE).unwrap();
    let ds = Dataset::from_parts(Vec::new(), rows).unwrap();

    let cmp = ds.compare_by_name("Canada", "France").unwrap();

    assert!(close(cmp.cost_delta().unwrap(), 0.0625));
    assert!(close(cmp.income_delta().unwrap(), 0.2857));
    assert!(close(cmp.ppi_delta().unwrap(), 0.2103));
    assert_eq!(
        cmp.cost.message.as_deref(),
        Some("Cost of living in Canada is 6.25% higher than in France")
    );
    assert_eq!(
        cmp.income.message.as_deref(),
        Some("Income in Canada is 28.57% higher than in France")
    );
    assert_eq!(
        cmp.ppi.message.as_deref(),
        Some("Purchasing power in Canada is 21.03% higher than in France")
    );
    assert_eq!(
        cmp.narrative.as_deref(),
        Some("People in Canada are 21.03% wealthier than people in France")
    );
    assert_eq!(cmp.messages().len(), 4);
    assert_eq!(
        cmp.metric_messages(),
        [
            "Cost of living in Canada is 6.25% higher than in France",
            "Income in Canada is 28.57% higher than in France",
            "Purchasing power in Canada is 21.03% higher than in France",
        ]
    );
}

#[test]
fn reversed_pair_reads_lower_and_poorer() {
    let rows = parse_rows(TABLE).unwrap();
    let ds = Dataset::from_parts(Vec::new(), rows).unwrap();

    let cmp = ds.compare_by_name("France", "Canada").unwrap();

    assert_eq!(
        cmp.cost.message.as_deref(),
        Some("Cost of living in France is 5.88% lower than in Canada")
    );
    assert_eq!(
        cmp.narrative.as_deref(),
        Some("People in France are 17.37% poorer than people in Canada")
    );
}

#[test]
fn delta_sign_follows_the_index_order() {
    let values = [12.5, 40.0, 80.0, 100.0, 142.1];
    for a in values {
        for b in values {
            let ra = record("A", Some(a), Some(a / 2.0), Some(b));
            let rb = record("B", Some(b), Some(b / 2.0), Some(a));
            let cmp = compare(&ra, &rb);
            assert_eq!(cmp.cost_delta().unwrap() > 0.0, a > b);
            assert_eq!(cmp.income_delta().unwrap() > 0.0, a > b);
            assert_eq!(cmp.ppi_delta().unwrap() > 0.0, b > a);
        }
    }
}

#[test]
fn equal_values_produce_no_message() {
    let a = record("A", Some(50.0), Some(60.0), Some(70.0));
    let b = record("B", Some(50.0), Some(30.0), Some(70.0));
    let cmp = compare(&a, &b);

    assert_eq!(cmp.cost.outcome.direction(), Some(Direction::Equal));
    assert_eq!(cmp.cost.message, None);
    assert_eq!(cmp.narrative, None);
    assert!(cmp.income.message.is_some());
}

#[test]
fn zero_or_missing_denominator_fails_soft() {
    let a = record("A", Some(50.0), None, Some(f64::NAN));
    let b = record("B", Some(0.0), Some(30.0), Some(70.0));
    let cmp = compare(&a, &b);

    for metric in Metric::ALL {
        assert_eq!(cmp.get(metric).outcome, DeltaOutcome::Unavailable);
        assert_eq!(cmp.get(metric).message, None);
    }
    assert_eq!(cmp.narrative, None);
    assert!(cmp.messages().is_empty());
}

#[test]
fn relative_delta_rejects_non_finite_inputs() {
    assert_eq!(relative_delta(Some(f64::INFINITY), Some(1.0)), DeltaOutcome::Unavailable);
    assert_eq!(relative_delta(Some(1.0), None), DeltaOutcome::Unavailable);
    assert_eq!(relative_delta(Some(0.0), Some(4.0)).delta(), Some(-1.0));
}

#[test]
fn unknown_country_is_an_error() {
    let rows = parse_rows(TABLE).unwrap();
    let ds = Dataset::from_parts(Vec::new(), rows).unwrap();
    let err = ds.compare_by_name("Canada", "Narnia").unwrap_err();
    assert!(matches!(err, CostMapError::UnknownCountry(name) if name == "Narnia"));
}
