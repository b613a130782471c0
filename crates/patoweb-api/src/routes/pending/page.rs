//! Pending-dues board rendering

use axum::extract::State;
use axum::response::Html;

use crate::AppState;
use patoweb_core::{DebtorCard, Summary};
use patoweb_utils::{format_brl, sanitize_html};

/// HTMX partial: the refreshable pending board
pub async fn htmx_pending_list(State(state): State<AppState>) -> Html<String> {
    if let Err(e) = state.ledger.refresh_if_stale().await {
        return Html(format!(
            r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4 text-sm text-red-600'>Sem dados: {}</div>"#,
            sanitize_html(&e.to_string())
        ));
    }

    match (state.ledger.summary(), state.ledger.debtor_board()) {
        (Ok(summary), Ok(board)) => Html(render_pending_board(
            &summary,
            &board,
            state.config.display.pending_columns,
        )),
        _ => Html(
            r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4 text-sm text-red-600'>Sem dados para exibir</div>"#
                .to_string(),
        ),
    }
}

/// Render the board: one card per pending due, laid out round-robin across
/// the configured columns. An empty board becomes the all-settled banner.
pub fn render_pending_board(summary: &Summary, board: &[DebtorCard], columns: usize) -> String {
    if board.is_empty() {
        return r#"<div class='bg-emerald-50 border border-emerald-200 rounded-xl p-6 text-center'>
    <p class='text-emerald-700 font-medium'>&#9989; Ninguém devendo! O time está em dia.</p>
</div>"#
            .to_string();
    }

    let columns = columns.max(1);
    let mut column_html = vec![String::new(); columns];
    for card in board {
        column_html[card.column].push_str(&render_card(card));
    }

    let mut html = format!(
        r#"<div class='bg-amber-50 border border-amber-200 rounded-lg p-3 mb-4 text-sm text-amber-700'>Total pendente: <strong>{}</strong></div>
<div class='grid grid-cols-1 md:grid-cols-{} gap-4'>"#,
        format_brl(summary.pending_total),
        columns
    );
    for col in column_html {
        html.push_str(&format!("<div class='space-y-4'>{}</div>", col));
    }
    html.push_str("</div>");
    html
}

fn render_card(card: &DebtorCard) -> String {
    let note = card
        .note
        .as_deref()
        .map(|n| format!("<p class='text-xs text-gray-400 mt-1'>{}</p>", sanitize_html(n)))
        .unwrap_or_default();
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-4 border-l-4 border-amber-400'>
    <div class='flex justify-between items-start'>
        <div>
            <p class='font-semibold'>{}</p>
            <p class='text-xs text-gray-500'>{} &middot; {}</p>
        </div>
        <span class='font-bold text-amber-600'>{}</span>
    </div>
    {}
</div>"#,
        sanitize_html(&card.name),
        sanitize_html(&card.category),
        sanitize_html(&card.month_label),
        format_brl(card.amount),
        note
    )
}
