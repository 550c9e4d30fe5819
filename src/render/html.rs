use crate::report::BatchView;

/// Render a self-contained HTML page with one bar chart per selectivity.
///
/// Data is embedded as JSON. We avoid `format!()` because the page contains
/// many `{}` from JS template literals, which would conflict with Rust formatting.
pub fn render_html_report(data: &BatchView) -> anyhow::Result<String> {
    // "</" inside embedded JSON would end the script element early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Stage Breakdown</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  main { padding: 12px 16px; display: flex; flex-wrap: wrap; gap: 24px; }
  section { min-width: 420px; flex: 1; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .muted { color: #777; font-size: 12px; }
  .skipped { color: #a33; font-size: 14px; }

  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  td { border-bottom: 1px solid #eee; padding: 4px 8px; font-size: 14px; }
  .num { text-align: right; font-variant-numeric: tabular-nums; white-space: nowrap; }
  .bar-cell { width: 50%; }
  .bar { height: 14px; background: #4c78a8; border-radius: 2px; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>
<main id="charts"></main>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

function fmtPct(x) {
  return x.toFixed(3);
}

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const ok = DATA.configurations.filter(c => c.status === "ok").length;
  const skipped = DATA.configurations.length - ok;
  document.getElementById("summary").innerHTML = `
    <span class="pill">selectivities: <b>${DATA.configurations.length}</b></span>
    <span class="pill">rendered: <b>${ok}</b></span>
    <span class="pill">skipped: <b>${skipped}</b></span>
  `;
}

function renderConfiguration(cfg) {
  const sec = document.createElement("section");
  const title = document.createElement("h2");
  title.textContent = `Selectivity ${cfg.selectivity} %`;
  sec.appendChild(title);

  if (cfg.status !== "ok") {
    const p = document.createElement("div");
    p.className = "skipped";
    p.textContent = "skipped: " + (cfg.reason || "unknown");
    sec.appendChild(p);
    return sec;
  }

  const meta = document.createElement("div");
  meta.className = "muted";
  const excluded = cfg.excluded_absolute === null
    ? ""
    : ` | ${escapeHtml(DATA.excluded_stage)} (absolute): ${cfg.excluded_absolute}`;
  meta.innerHTML = `total: ${cfg.total}` + excluded;
  sec.appendChild(meta);

  const tbl = document.createElement("table");
  const max = Math.max(...cfg.percentages, 0);
  cfg.labels.forEach((label, i) => {
    const pct = cfg.percentages[i];
    const width = max > 0 ? (pct / max) * 100 : 0;
    const tr = document.createElement("tr");
    tr.innerHTML = `
      <td><code>${escapeHtml(label)}</code></td>
      <td class="bar-cell"><div class="bar" style="width: ${width}%"></div></td>
      <td class="num">${fmtPct(pct)} %</td>
    `;
    tbl.appendChild(tr);
  });
  sec.appendChild(tbl);
  return sec;
}

renderSummary();
const charts = document.getElementById("charts");
for (const cfg of DATA.configurations) charts.appendChild(renderConfiguration(cfg));
</script>
</body>
</html>
"#;

    Ok(TEMPLATE.replace("__DATA__", &json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ConfigurationView;

    #[test]
    fn embeds_data_and_escapes_script_close() {
        let view = BatchView {
            excluded_stage: "scan_file",
            configurations: vec![ConfigurationView {
                selectivity: 10,
                status: "ok",
                reason: None,
                labels: vec!["</script>".to_string(), "transfer".to_string()],
                percentages: vec![40.0, 60.0],
                excluded_absolute: Some(3.5),
                total: Some(10.0),
            }],
        };

        let html = render_html_report(&view).unwrap();
        assert!(!html.contains("__DATA__"));
        assert!(html.contains(r#""selectivity":10"#));
        assert!(html.contains(r#""transfer""#));
        assert!(!html.contains(r#""</script>""#));
        assert!(html.contains(r#""<\/script>""#));
    }
}
