//! Public home page: totals, today's totals, recent donations

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use auth::domain::repository::UserRepository;
use donation::application::DonationStatsUseCase;
use donation::{Currency, DonationRepository, DonationStats};

use super::PagesState;
use super::html::{banner, escape, layout};

/// GET /
pub async fn home<U, D>(State(state): State<PagesState<U, D>>, headers: HeaderMap) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let session = state.session(&headers);

    let stats = DonationStatsUseCase::new(state.donations.clone(), state.donation.clone())
        .execute(Utc::now())
        .await;

    match stats {
        Ok(stats) => layout("Myanmar Earthquake Relief", session.as_ref(), &render_stats(&stats))
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load statistics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                layout(
                    "Myanmar Earthquake Relief",
                    session.as_ref(),
                    &banner("error", "Statistics are unavailable right now."),
                ),
            )
                .into_response()
        }
    }
}

fn render_stats(stats: &DonationStats) -> String {
    let mut body = format!(
        r#"<section class="totals">
<p>Total donations: <strong>{}</strong></p>
<p>Total raised: <strong>{}</strong> and <strong>{}</strong></p>
<p>Today: <strong>{}</strong> and <strong>{}</strong></p>
</section>
<section class="methods"><h2>By payment method</h2><ul>"#,
        stats.total_count,
        Currency::MMK.format_amount(stats.total_mmk),
        Currency::VND.format_amount(stats.total_vnd),
        Currency::MMK.format_amount(stats.today_mmk),
        Currency::VND.format_amount(stats.today_vnd),
    );

    for (method, count) in &stats.by_method {
        body.push_str(&format!("<li>{method}: {count}</li>"));
    }
    body.push_str("</ul></section>");

    body.push_str(r#"<section class="recent"><h2>Recent donations</h2>"#);
    if stats.recent.is_empty() {
        body.push_str("<p>No donations yet.</p>");
    } else {
        body.push_str(
            "<table><thead><tr><th>Donor</th><th>Amount</th><th>Method</th><th>Date</th></tr></thead><tbody>",
        );
        for donation in &stats.recent {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&donation.label),
                escape(&donation.currency.format_amount(donation.amount)),
                donation.method,
                donation.date_time.format("%Y-%m-%d %H:%M UTC"),
            ));
        }
        body.push_str("</tbody></table>");
    }
    body.push_str("</section>");

    body
}
