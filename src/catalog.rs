use crate::errors::DashboardError;
use serde::Serialize;

/// Value rule a metric draws its daily samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Price,
    Volume,
    Return,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub color_token: &'static str,
    pub category: MetricCategory,
}

const fn metric(
    id: &'static str,
    display_name: &'static str,
    color_token: &'static str,
    category: MetricCategory,
) -> MetricDescriptor {
    MetricDescriptor {
        id,
        display_name,
        color_token,
        category,
    }
}

const DEFAULT_SELECTION_LEN: usize = 3;

static CATALOG: [MetricDescriptor; 12] = [
    metric("twitter_post", "Posts Twitter", "hsl(var(--chart-1))", MetricCategory::Count),
    metric("twitter_user", "Utilisateurs Twitter", "hsl(var(--chart-2))", MetricCategory::Count),
    metric("discord_message", "Messages Discord", "hsl(var(--chart-3))", MetricCategory::Count),
    metric("discord_user", "Utilisateurs Discord", "hsl(var(--chart-4))", MetricCategory::Count),
    metric("telegram_message", "Messages Telegram", "hsl(var(--chart-5))", MetricCategory::Count),
    metric("telegram_user", "Utilisateurs Telegram", "hsl(var(--chart-6))", MetricCategory::Count),
    metric("github_commit", "Commits GitHub", "hsl(var(--chart-7))", MetricCategory::Count),
    metric(
        "github_developer",
        "Développeurs GitHub",
        "hsl(var(--chart-8))",
        MetricCategory::Count,
    ),
    metric("opening_price", "Prix d'ouverture", "hsl(var(--chart-9))", MetricCategory::Price),
    metric("closing_price", "Prix de clôture", "hsl(var(--chart-10))", MetricCategory::Price),
    metric("trading_volume", "Volume d'échanges", "hsl(var(--chart-11))", MetricCategory::Volume),
    metric("return", "Rendement", "hsl(var(--chart-12))", MetricCategory::Return),
];

/// Every metric the dashboard knows about, in display order.
pub fn catalog() -> &'static [MetricDescriptor] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static MetricDescriptor> {
    CATALOG.iter().find(|metric| metric.id == id)
}

pub fn require(id: &str) -> Result<&'static MetricDescriptor, DashboardError> {
    find(id).ok_or_else(|| DashboardError::UnknownMetric(id.to_string()))
}

pub fn default_selection() -> impl Iterator<Item = &'static str> {
    CATALOG[..DEFAULT_SELECTION_LEN].iter().map(|metric| metric.id)
}
