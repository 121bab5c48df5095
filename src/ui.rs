use crate::catalog::catalog;
use crate::models::{DashboardResponse, SummaryCard};
use std::fmt::Write;

pub fn render_dashboard(response: &DashboardResponse, days: Option<u32>) -> String {
    let chart_json = serde_json::to_string(&response.chart)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");

    INDEX_HTML
        .replace("{{TITLE}}", &escape_html(&response.title))
        .replace("{{DATE}}", &response.generated_on)
        .replace("{{RECORDS}}", &response.chart.data.len().to_string())
        .replace("{{TOGGLES}}", &render_toggles(response, days))
        .replace("{{CARDS}}", &render_cards(&response.summary))
        .replace("{{CHART_JSON}}", &chart_json)
}

fn render_toggles(response: &DashboardResponse, days: Option<u32>) -> String {
    let current = response.selection.to_query();
    let days_param = days.map(|days| format!("&amp;days={days}")).unwrap_or_default();

    let mut out = String::new();
    for metric in catalog() {
        let checked = response.selection.contains(metric.id);
        let _ = write!(
            out,
            r#"<a class="toggle{active}" href="?metrics={current}&amp;toggle={id}{days_param}" role="checkbox" aria-checked="{checked}"><span class="box" style="--swatch: {color}"></span>{name}</a>"#,
            active = if checked { " active" } else { "" },
            id = metric.id,
            color = metric.color_token,
            name = escape_html(metric.display_name),
        );
        out.push('\n');
    }
    out
}

fn render_cards(cards: &[SummaryCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let _ = write!(
            out,
            r#"<div class="stat"><span class="label">{name}</span><span class="value" style="color: {color}">{value}</span><span class="change">{change}% par rapport au jour précédent</span></div>"#,
            name = escape_html(&card.name),
            color = card.color,
            value = card.value,
            change = card.change,
        );
        out.push('\n');
    }
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f6f7f9;
      --ink: #1f2430;
      --muted: #6b7280;
      --card: #ffffff;
      --border: rgba(31, 36, 48, 0.08);
      --chart-1: 12 76% 61%;
      --chart-2: 173 58% 39%;
      --chart-3: 197 37% 24%;
      --chart-4: 43 74% 66%;
      --chart-5: 27 87% 67%;
      --chart-6: 220 70% 50%;
      --chart-7: 160 60% 45%;
      --chart-8: 30 80% 55%;
      --chart-9: 280 65% 60%;
      --chart-10: 340 75% 55%;
      --chart-11: 200 80% 45%;
      --chart-12: 95 55% 42%;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1200px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-size: clamp(1.5rem, 3vw, 1.9rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .card {
      background: var(--card);
      border-radius: 14px;
      border: 1px solid var(--border);
      padding: 20px;
      display: grid;
      gap: 16px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.15rem;
    }

    .toggles {
      display: flex;
      flex-wrap: wrap;
      gap: 10px 18px;
    }

    .toggle {
      display: inline-flex;
      align-items: center;
      gap: 8px;
      font-size: 0.85rem;
      color: var(--ink);
      text-decoration: none;
    }

    .toggle .box {
      width: 16px;
      height: 16px;
      border-radius: 4px;
      border: 2px solid var(--swatch);
    }

    .toggle.active .box {
      background: var(--swatch);
    }

    #chart {
      width: 100%;
      height: 420px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(31, 36, 48, 0.1);
      stroke-dasharray: 3 3;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 12px;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      font-size: 12px;
      justify-content: center;
    }

    .legend span::before {
      content: "";
      display: inline-block;
      width: 10px;
      height: 2px;
      margin-right: 6px;
      vertical-align: middle;
      background: var(--swatch);
    }

    .tooltip {
      min-height: 1.2em;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 14px;
      border: 1px solid var(--border);
      padding: 18px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.85rem;
      font-weight: 600;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 700;
    }

    .stat .change {
      font-size: 0.75rem;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>{{TITLE}}</h1>
      <p class="subtitle">Données synthétiques générées le {{DATE}} ({{RECORDS}} jours).</p>
    </header>

    <section class="card">
      <h2>Données historiques</h2>
      <nav class="toggles">
{{TOGGLES}}
      </nav>
      <svg id="chart" viewBox="0 0 960 420" aria-label="Historique" role="img"></svg>
      <div class="legend" id="legend"></div>
      <div class="tooltip" id="tooltip"></div>
    </section>

    <section class="cards">
{{CARDS}}
    </section>
  </main>

  <script type="application/json" id="chart-data">{{CHART_JSON}}</script>
  <script>
    const payload = JSON.parse(document.getElementById('chart-data').textContent);
    const chartEl = document.getElementById('chart');
    const legendEl = document.getElementById('legend');
    const tooltipEl = document.getElementById('tooltip');
    const colorOf = (key) => payload.colors[key] || 'currentColor';

    const formatAxisValue = (value) => {
      const abs = Math.abs(value);
      if (abs >= 1e6) return (value / 1e6).toFixed(1) + 'M';
      if (abs >= 1e3) return (value / 1e3).toFixed(1) + 'k';
      return Number.isInteger(value) ? value.toString() : value.toFixed(1);
    };

    const renderLineChart = () => {
      const data = payload.data;
      const keys = payload.series_keys;
      if (!data.length || !keys.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">Aucune série sélectionnée</text>';
        legendEl.innerHTML = '';
        return;
      }

      const width = 960;
      const height = 420;
      const left = 64;
      const right = 16;
      const top = 16;
      const bottom = 36;

      let min = Infinity;
      let max = -Infinity;
      data.forEach((row) => keys.forEach((key) => {
        min = Math.min(min, row[key]);
        max = Math.max(max, row[key]);
      }));
      min = Math.min(min, 0);
      if (min === max) {
        max += 1;
      }

      const range = max - min;
      const xStep = data.length > 1 ? (width - left - right) / (data.length - 1) : 0;
      const x = (index) => left + index * xStep;
      const y = (value) => height - bottom - ((value - min) / range) * (height - top - bottom);

      let grid = '';
      const ticks = 5;
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        grid += `<line class="chart-grid" x1="${left}" y1="${y(value)}" x2="${width - right}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${left - 8}" y="${y(value) + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(data.length / 8));
      let xLabels = '';
      data.forEach((row, index) => {
        if (index % labelEvery === 0 || index === data.length - 1) {
          xLabels += `<text class="chart-label" x="${x(index)}" y="${height - bottom + 20}" text-anchor="middle">${row.date}</text>`;
        }
      });

      const lines = keys.map((key) => {
        const d = data
          .map((row, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(row[key]).toFixed(2)}`)
          .join(' ');
        return `<path class="chart-line" style="stroke: ${colorOf(key)}" d="${d}" />`;
      }).join('');

      chartEl.innerHTML = `${grid}${lines}${xLabels}<line id="cursor" class="chart-grid" y1="${top}" y2="${height - bottom}" x1="-10" x2="-10" />`;

      const names = {};
      document.querySelectorAll('.toggle').forEach((el) => {
        const id = new URLSearchParams(el.getAttribute('href').slice(1)).get('toggle');
        names[id] = el.textContent;
      });
      legendEl.innerHTML = keys
        .map((key) => `<span style="--swatch: ${colorOf(key)}">${names[key] || key}</span>`)
        .join('');

      chartEl.addEventListener('mousemove', (event) => {
        const rect = chartEl.getBoundingClientRect();
        const px = ((event.clientX - rect.left) / rect.width) * width;
        const index = xStep ? Math.round((px - left) / xStep) : 0;
        const row = data[Math.min(Math.max(index, 0), data.length - 1)];
        const cursor = document.getElementById('cursor');
        cursor.setAttribute('x1', x(data.indexOf(row)));
        cursor.setAttribute('x2', x(data.indexOf(row)));
        tooltipEl.textContent = row.date + ' : ' + keys
          .map((key) => `${names[key] || key} ${row[key].toLocaleString('fr-FR')}`)
          .join(' · ');
      });
    };

    renderLineChart();
  </script>
</body>
</html>
"#;
