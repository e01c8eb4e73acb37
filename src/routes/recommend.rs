use crate::services::plan_renderer::{escape_html, RenderedPlan, PLAN_OUTPUT_STYLES};
use crate::services::submission::{PlanForm, PlanSubmission};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/*
    GET /recommend
*/
pub async fn form_page() -> impl Responder {
    html_response(render_page(&PlanForm::default(), None))
}

/*
    POST /recommend
*/
pub async fn submit(state: web::Data<AppState>, input: Option<web::Form<PlanForm>>) -> impl Responder {
    let form = input.map(web::Form::into_inner).unwrap_or_default();

    let mut submission = PlanSubmission::new(&state.plan_client);
    let output = submission.submit(&form).await.output();

    html_response(render_page(&form, output.as_ref()))
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn render_page(form: &PlanForm, output: Option<&RenderedPlan>) -> String {
    let section_class = if output.is_some() { "" } else { " class=\"hidden\"" };
    let output_html = output.map(RenderedPlan::to_html).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Plan your trip</title>
<style>
.hidden {{ display: none; }}
{styles}</style>
</head>
<body>
<form id="bookingForm" method="post" action="/recommend">
  <label>Destination <input id="destination" name="destination" value="{destination}" required></label>
  <label>Departure <input id="departureDate" name="departureDate" type="date" value="{departure}" required></label>
  <label>Return <input id="returnDate" name="returnDate" type="date" value="{return_date}" required></label>
  <label>Travelers <input id="travelers" name="travelers" type="number" min="1" value="{travelers}" required></label>
  <label>Preferences <textarea id="preferences" name="preferences">{preferences}</textarea></label>
  <button type="submit">Generate plan</button>
</form>
<section id="planSection"{section_class}>
<div id="planOutput">{output}</div>
</section>
</body>
</html>
"#,
        styles = PLAN_OUTPUT_STYLES,
        destination = escape_html(&form.destination),
        departure = escape_html(&form.departure_date),
        return_date = escape_html(&form.return_date),
        travelers = escape_html(&form.travelers),
        preferences = escape_html(&form.preferences),
        section_class = section_class,
        output = output_html,
    )
}
