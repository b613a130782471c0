//! Dashboard page rendering

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::routes::pending::page::render_pending_board;
use crate::{page_response, render_source_error, session_from_headers, AppState};
use patoweb_core::{CategorySlice, MonthFlow, MonthlyPoint, Summary};
use patoweb_utils::format_brl;

/// Full dashboard page
pub async fn page_dashboard(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let session = session_from_headers(&state.config, &headers);
    if !session.authenticated {
        return Redirect::to("/login").into_response();
    }

    if let Err(e) = state.ledger.refresh_if_stale().await {
        return Html(render_source_error(&state.config, &e.to_string())).into_response();
    }

    let (summary, board, series, categories, history) = match (
        state.ledger.summary(),
        state.ledger.debtor_board(),
        state.ledger.monthly_series(),
        state.ledger.category_breakdown(),
        state.ledger.monthly_history(),
    ) {
        (Ok(s), Ok(b), Ok(se), Ok(c), Ok(h)) => (s, b, se, c, h),
        _ => return Html(render_source_error(&state.config, "snapshot indisponível")).into_response(),
    };

    let inner = format!(
        "{}{}<div class='border-t my-6'></div>{}<div class='border-t my-6'></div>{}",
        render_kpi_cards(&summary),
        render_goal_bar(&summary),
        render_pending_section(&summary, &board, state.config.display.pending_columns),
        render_charts(&categories, &history, &series)
    );

    Html(page_response(&state.config, "Painel", &inner)).into_response()
}

/// KPI cards: balance, pending total, goal progress
fn render_kpi_cards(summary: &Summary) -> String {
    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
    <div class='bg-emerald-50 p-4 rounded-xl border border-emerald-200'>
        <p class='text-sm text-emerald-600'>&#128176; Saldo em Caixa</p>
        <p class='text-2xl font-bold text-emerald-700'>{}</p>
    </div>
    <div class='bg-amber-50 p-4 rounded-xl border border-amber-200'>
        <p class='text-sm text-amber-600'>&#9888;&#65039; A Receber (Pendências)</p>
        <p class='text-2xl font-bold text-amber-700'>{}</p>
    </div>
    <div class='bg-indigo-50 p-4 rounded-xl border border-indigo-200'>
        <p class='text-sm text-indigo-600'>&#127919; Meta Reserva</p>
        <p class='text-2xl font-bold text-indigo-700'>{}%</p>
    </div>
</div>"#,
        format_brl(summary.balance),
        format_brl(summary.pending_total),
        summary.goal_progress
    )
}

/// Goal progress bar with the target caption
fn render_goal_bar(summary: &Summary) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-4'>
    <div class='w-full bg-gray-200 rounded-full h-3'>
        <div class='bg-indigo-600 h-3 rounded-full' style='width: {}%'></div>
    </div>
    <p class='text-xs text-gray-500 mt-2'>Meta: {} | Atual: {}</p>
</div>"#,
        summary.goal_progress,
        format_brl(summary.goal_target),
        format_brl(summary.balance)
    )
}

/// Pending-dues section wrapper around the HTMX-refreshable board
fn render_pending_section(
    summary: &Summary,
    board: &[patoweb_core::DebtorCard],
    columns: usize,
) -> String {
    format!(
        r#"<section>
    <h2 class='text-lg font-bold mb-3'>&#128203; Mural da Transparência (Pendências)</h2>
    <div id='pending-board' hx-get='/pendencias/list' hx-trigger='every 120s'>{}</div>
</section>"#,
        render_pending_board(summary, board, columns)
    )
}

/// Both charts plus the inline data they render from
fn render_charts(
    categories: &[CategorySlice],
    history: &[MonthFlow],
    series: &[MonthlyPoint],
) -> String {
    let category_labels: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
    let category_values: Vec<f64> = categories.iter().map(|c| c.amount).collect();

    let month_labels: Vec<&str> = history.iter().map(|m| m.month_label.as_str()).collect();
    let inflows: Vec<f64> = history.iter().map(|m| m.inflow).collect();
    let outflows: Vec<f64> = history.iter().map(|m| m.outflow).collect();

    // Cumulative balance aligned to the history labels; months without a
    // non-zero cash effect carry the previous value forward
    let mut cumulative = Vec::with_capacity(history.len());
    let mut last = 0.0;
    for month in history {
        if let Some(point) = series.iter().find(|p| p.month_label == month.month_label) {
            last = point.cumulative_balance;
        }
        cumulative.push(last);
    }

    format!(
        r#"<div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
    <div class='bg-white rounded-xl shadow-sm p-6'>
        <h3 class='text-lg font-semibold mb-4'>&#128202; Origem do Dinheiro</h3>
        <canvas id='chart-categories'></canvas>
    </div>
    <div class='bg-white rounded-xl shadow-sm p-6'>
        <h3 class='text-lg font-semibold mb-4'>&#128197; Histórico Mensal</h3>
        <canvas id='chart-history'></canvas>
    </div>
</div>
<script>
new Chart(document.getElementById('chart-categories'), {{
    type: 'doughnut',
    data: {{
        labels: {},
        datasets: [{{ data: {} }}]
    }}
}});
new Chart(document.getElementById('chart-history'), {{
    data: {{
        labels: {},
        datasets: [
            {{ type: 'bar', label: 'Entradas', backgroundColor: '#16a34a', data: {} }},
            {{ type: 'bar', label: 'Saídas', backgroundColor: '#dc2626', data: {} }},
            {{ type: 'line', label: 'Saldo acumulado', borderColor: '#4f46e5', data: {} }}
        ]
    }}
}});
</script>"#,
        serde_json::to_string(&category_labels).unwrap_or_default(),
        serde_json::to_string(&category_values).unwrap_or_default(),
        serde_json::to_string(&month_labels).unwrap_or_default(),
        serde_json::to_string(&inflows).unwrap_or_default(),
        serde_json::to_string(&outflows).unwrap_or_default(),
        serde_json::to_string(&cumulative).unwrap_or_default(),
    )
}
