//! Administrator pages: dashboard, donation listing, donation form

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use kernel::error::field_errors::FieldErrors;
use serde::Deserialize;

use auth::SessionClaims;
use auth::domain::repository::UserRepository;
use donation::application::{ListDonationsUseCase, RecordDonationUseCase};
use donation::domain::validation::{AmountInput, DonationInput};
use donation::domain::value_objects::PageRequest;
use donation::presentation::dto::PageQuery;
use donation::{Currency, Donation, DonationError, DonationRepository, PaymentMethod};

use super::PagesState;
use super::html::{banner, escape, field_error, layout, options};

// ============================================================================
// Dashboard
// ============================================================================

/// GET /admin
pub async fn dashboard<U, D>(
    State(state): State<PagesState<U, D>>,
    claims: SessionClaims,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let users = state.users.list_all().await;
    let recent = ListDonationsUseCase::new(state.donations.clone())
        .recently_recorded(state.donation.recent_admin)
        .await;

    let (users, recent) = match (users, recent) {
        (Ok(users), Ok(recent)) => (users, recent),
        (Err(e), _) => {
            tracing::error!(error = %e, "Failed to load users");
            return unavailable(&claims, "Dashboard");
        }
        (_, Err(e)) => {
            tracing::error!(error = %e, "Failed to load recent donations");
            return unavailable(&claims, "Dashboard");
        }
    };

    let mut body = format!(
        "<p>Welcome, {}.</p><section><h2>Administrators</h2><table><thead><tr><th>ID</th><th>Username</th><th>Name</th><th>Created</th></tr></thead><tbody>",
        escape(claims.label())
    );
    for user in &users {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            user.user_id,
            escape(user.user_name.as_str()),
            escape(user.display_name.as_deref().unwrap_or("")),
            user.created_at.format("%Y-%m-%d"),
        ));
    }
    body.push_str("</tbody></table></section>");

    body.push_str("<section><h2>Recently recorded</h2>");
    body.push_str(&donation_table(&recent));
    body.push_str(r#"<p><a href="/admin/donations">All donations</a></p></section>"#);

    layout("Dashboard", Some(&claims), &body).into_response()
}

// ============================================================================
// Listing
// ============================================================================

/// GET /admin/donations?page=N
pub async fn donation_list<U, D>(
    State(state): State<PagesState<U, D>>,
    claims: SessionClaims,
    Query(query): Query<PageQuery>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let request = PageRequest::from_query(query.page.as_deref(), state.donation.page_size);

    let page = match ListDonationsUseCase::new(state.donations.clone())
        .page(request)
        .await
    {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list donations");
            return unavailable(&claims, "Donations");
        }
    };

    let mut body = format!(
        "<p>{} donations, page {} of {}</p>",
        page.total,
        page.page,
        page.total_pages.max(1)
    );
    body.push_str(&donation_table(&page.items));

    body.push_str(r#"<nav class="pagination">"#);
    if page.page > 1 {
        body.push_str(&format!(
            r#"<a href="/admin/donations?page={}">Previous</a> "#,
            page.page - 1
        ));
    }
    if (page.page as i64) < page.total_pages {
        body.push_str(&format!(
            r#"<a href="/admin/donations?page={}">Next</a>"#,
            page.page + 1
        ));
    }
    body.push_str("</nav>");

    layout("Donations", Some(&claims), &body).into_response()
}

// ============================================================================
// Create form
// ============================================================================

/// Donation form fields, as typed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationForm {
    pub donor_name: String,
    pub amount: String,
    pub currency: String,
    pub method: String,
    pub date_time: String,
}

impl DonationForm {
    fn blank() -> Self {
        Self {
            date_time: Utc::now().format("%Y-%m-%dT%H:%M").to_string(),
            ..Default::default()
        }
    }

    fn to_input(&self) -> DonationInput {
        DonationInput {
            donor_name: Some(self.donor_name.clone().into()),
            amount: Some(AmountInput::Text(self.amount.clone())),
            currency: Some(self.currency.clone().into()),
            method: Some(self.method.clone().into()),
            date_time: Some(self.date_time.clone().into()),
        }
    }
}

/// GET /admin/donations/create
pub async fn create_form(claims: SessionClaims) -> Html<String> {
    render_form(&claims, &DonationForm::blank(), &FieldErrors::new(), None)
}

/// POST /admin/donations/create
///
/// Runs the same validator as the JSON API.
pub async fn create_submit<U, D>(
    State(state): State<PagesState<U, D>>,
    claims: SessionClaims,
    Form(form): Form<DonationForm>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    D: DonationRepository + Send + Sync + 'static,
{
    let result = RecordDonationUseCase::new(state.donations.clone())
        .execute(&form.to_input())
        .await;

    match result {
        Ok(donation) => {
            tracing::info!(
                donation_id = %donation.donation_id,
                recorded_by = claims.sub,
                "Donation recorded via form"
            );
            let message = format!(
                "Donation added successfully: {} from {}",
                donation.formatted_amount(),
                donation.admin_label()
            );
            render_form(
                &claims,
                &DonationForm::blank(),
                &FieldErrors::new(),
                Some(("success", message.as_str())),
            )
            .into_response()
        }
        Err(DonationError::Validation(errors)) => (
            StatusCode::BAD_REQUEST,
            render_form(
                &claims,
                &form,
                &errors,
                Some(("error", "Please fix the highlighted fields.")),
            ),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to record donation from form");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                render_form(
                    &claims,
                    &form,
                    &FieldErrors::new(),
                    Some(("error", "Failed to add donation")),
                ),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Unknown admin path
// ============================================================================

/// Any other `/admin/...` path (reached only with a session)
pub async fn not_found(claims: SessionClaims) -> Response {
    (
        StatusCode::NOT_FOUND,
        layout(
            "Not found",
            Some(&claims),
            &banner("error", "This page does not exist."),
        ),
    )
        .into_response()
}

// ============================================================================
// Rendering
// ============================================================================

fn render_form(
    claims: &SessionClaims,
    form: &DonationForm,
    errors: &FieldErrors,
    notice: Option<(&str, &str)>,
) -> Html<String> {
    let currencies: Vec<&str> = Currency::ALL.iter().map(Currency::as_str).collect();
    let methods: Vec<&str> = PaymentMethod::ALL.iter().map(PaymentMethod::as_str).collect();

    let body = format!(
        r#"{notice}<form method="post" action="/admin/donations/create">
<label>Donor name (optional) <input name="donorName" value="{donor_name}"></label>
<label>Amount <input name="amount" inputmode="decimal" value="{amount}"></label> {amount_error}
<label>Currency <select name="currency">{currency_options}</select></label> {currency_error}
<label>Method <select name="method">{method_options}</select></label> {method_error}
<label>Date and time (UTC) <input type="datetime-local" name="dateTime" value="{date_time}"></label> {date_error}
<p class="hint">KPay uses MMK, BIDV uses VND.</p>
<button type="submit">Add donation</button>
</form>"#,
        notice = notice
            .map(|(kind, message)| banner(kind, message))
            .unwrap_or_default(),
        donor_name = escape(&form.donor_name),
        amount = escape(&form.amount),
        amount_error = field_error(errors, "amount"),
        currency_options = options(&currencies, &form.currency),
        currency_error = field_error(errors, "currency"),
        method_options = options(&methods, &form.method),
        method_error = field_error(errors, "method"),
        date_time = escape(&form.date_time),
        date_error = field_error(errors, "dateTime"),
    );

    layout("Add donation", Some(claims), &body)
}

fn donation_table(donations: &[Donation]) -> String {
    if donations.is_empty() {
        return "<p>No donations yet.</p>".to_string();
    }

    let mut table = String::from(
        "<table><thead><tr><th>ID</th><th>Donor</th><th>Amount</th><th>Method</th><th>Date</th><th>Recorded</th></tr></thead><tbody>",
    );
    for donation in donations {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            donation.donation_id,
            escape(&donation.admin_label()),
            escape(&donation.formatted_amount()),
            donation.method,
            donation.date_time.format("%Y-%m-%d %H:%M"),
            donation.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    table.push_str("</tbody></table>");
    table
}

fn unavailable(claims: &SessionClaims, title: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        layout(
            title,
            Some(claims),
            &banner("error", "Something went wrong. Please try again."),
        ),
    )
        .into_response()
}
