use crate::catalog::catalog;
use crate::errors::DashboardError;
use crate::generator::{check_day_count, generate};
use crate::models::{ChartPayload, DashboardQuery, DashboardResponse};
use crate::selection::SelectionSet;
use crate::state::AppState;
use crate::summary::build_summary;
use chrono::{Local, NaiveDate};
use rand::Rng;

pub fn build_dashboard(
    state: &AppState,
    project_id: &str,
    query: &DashboardQuery,
) -> Result<DashboardResponse, DashboardError> {
    let mut rng = state.rng();
    build_dashboard_at(
        Local::now().date_naive(),
        &mut rng,
        state.config.day_count,
        project_id,
        query,
    )
}

/// Assembles the page model for one render: selection from the query,
/// a freshly generated dataset, and the summary cards.
pub fn build_dashboard_at<R: Rng + ?Sized>(
    today: NaiveDate,
    rng: &mut R,
    default_day_count: u32,
    project_id: &str,
    query: &DashboardQuery,
) -> Result<DashboardResponse, DashboardError> {
    let selection = resolve_selection(query)?;
    let day_count = check_day_count(query.days.unwrap_or(default_day_count))?;
    let dataset = generate(rng, today, day_count)?;
    let summary = build_summary(&dataset);

    let colors = catalog()
        .iter()
        .map(|metric| (metric.id.to_string(), metric.color_token.to_string()))
        .collect();

    Ok(DashboardResponse {
        project_id: project_id.to_string(),
        title: format!("{} Tableau de bord", capitalize_words(project_id)),
        generated_on: today.to_string(),
        chart: ChartPayload {
            data: dataset,
            series_keys: selection.chart_keys().to_vec(),
            colors,
        },
        selection,
        summary,
    })
}

pub fn resolve_selection(query: &DashboardQuery) -> Result<SelectionSet, DashboardError> {
    let selection = match query.metrics.as_deref() {
        Some(raw) => SelectionSet::parse(raw)?,
        None => SelectionSet::default(),
    };
    match query.toggle.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => selection.try_toggle(id),
        _ => Ok(selection),
    }
}

/// Upper-cases the first letter of every whitespace-separated word.
pub fn capitalize_words(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if at_word_start && !ch.is_whitespace() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn default_query_uses_default_selection_and_day_count() {
        let mut rng = StdRng::seed_from_u64(5);
        let query = DashboardQuery::default();
        let response = build_dashboard_at(today(), &mut rng, 1000, "solana", &query).unwrap();
        assert_eq!(response.title, "Solana Tableau de bord");
        assert_eq!(response.chart.data.len(), 1001);
        assert_eq!(
            response.chart.series_keys,
            vec!["twitter_post", "twitter_user", "discord_message"]
        );
        assert_eq!(response.summary.len(), 12);
        assert_eq!(response.chart.colors.len(), 12);
        assert_eq!(response.generated_on, "2024-06-10");
    }

    #[test]
    fn query_overrides_selection_and_days() {
        let mut rng = StdRng::seed_from_u64(5);
        let query = DashboardQuery {
            metrics: Some("return".into()),
            toggle: Some("closing_price".into()),
            days: Some(2),
        };
        let response = build_dashboard_at(today(), &mut rng, 1000, "x", &query).unwrap();
        assert_eq!(response.chart.series_keys, vec!["return", "closing_price"]);
        assert_eq!(response.chart.data.len(), 3);
        assert_eq!(response.chart.data.records()[0].date, "2024-06-08");
    }

    #[test]
    fn empty_metrics_means_nothing_selected() {
        let query = DashboardQuery {
            metrics: Some(String::new()),
            ..DashboardQuery::default()
        };
        assert!(resolve_selection(&query).unwrap().chart_keys().is_empty());
    }

    #[test]
    fn unknown_toggle_is_an_error() {
        let query = DashboardQuery {
            toggle: Some("friendster_user".into()),
            ..DashboardQuery::default()
        };
        assert_eq!(
            resolve_selection(&query).unwrap_err(),
            DashboardError::UnknownMetric("friendster_user".into())
        );
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("my cool project"), "My Cool Project");
        assert_eq!(capitalize_words("ethereum-classic"), "Ethereum-classic");
        assert_eq!(capitalize_words("élan"), "Élan");
        assert_eq!(capitalize_words(""), "");
    }
}
