use churnwatch::application::PortfolioSummary;
use churnwatch::config::Config;
use churnwatch::domain::churn::RiskLevel;
use churnwatch::domain::health::HealthStatus;
use churnwatch::infrastructure::{ServiceFactory, customer_csv};
use std::io::Write;

const CUSTOMERS: &str = "\
customer_id,tenure_months,monthly_revenue,total_interactions,support_tickets,last_login_days,feature_usage_score
high-risk,3,45,8,6,21,1.2
healthy,24,350,85,1,1,4.8
new,1,150,5,2,3,2.5
broken,12,-5,45,2,3,3.8
typo,12,200,4x,2,3,3.8
";

#[test]
fn test_csv_batch_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CUSTOMERS.as_bytes()).unwrap();

    let mut config = Config::default();
    config.observability.metrics_enabled = true;
    let service = ServiceFactory::create_service(&config).unwrap();

    let rows = customer_csv::read_customers_file(file.path()).unwrap();
    let entries = customer_csv::assess_rows(&service, rows);

    let ids: Vec<&str> = entries.iter().map(|e| e.customer_id.as_str()).collect();
    assert_eq!(ids, vec!["high-risk", "healthy", "new", "broken", "typo"]);

    let high = entries[0].outcome.as_ref().unwrap();
    assert_eq!(high.customer_id.as_deref(), Some("high-risk"));
    assert_eq!(high.churn.risk_level, RiskLevel::High);

    assert_eq!(
        entries[3].outcome.as_ref().unwrap_err().field(),
        Some("monthly_revenue")
    );
    assert_eq!(
        entries[4].outcome.as_ref().unwrap_err().field(),
        Some("total_interactions")
    );

    let summary = PortfolioSummary::from_entries(&entries);
    assert_eq!(summary.total_customers, 5);
    assert_eq!(summary.assessed, 3);
    assert_eq!(summary.failures, 2);
    assert_eq!(summary.high_risk_customers, 1);
    assert_eq!(summary.health_distribution[&HealthStatus::Excellent], 1);
    assert_eq!(summary.health_distribution[&HealthStatus::Poor], 1);

    let rendered = service.metrics().unwrap().render();
    assert!(rendered.contains("churnwatch_assessments_total"));
    // Both rows rejected while parsing still reach the error counter
    assert!(rendered.contains("churnwatch_scoring_errors_total{kind=\"validation\"} 2"));
}

#[test]
fn test_summary_serializes() {
    let summary = PortfolioSummary::from_entries(&[]);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_customers"], 0);
    assert!(json["health_distribution"]["Excellent"].is_number());
    assert!(json["generated_at"].is_string());
}
