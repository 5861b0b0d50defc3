use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const APPLICATION_NAME: &str = "budgetaryApp";

const ALERT_HEADER: &str = "x-budgetaryapp-alert";
const ERROR_HEADER: &str = "x-budgetaryapp-error";
const PARAMS_HEADER: &str = "x-budgetaryapp-params";

fn header_value(value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(value).ok()
}

fn alert(header: &'static str, message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(value) = header_value(message) {
        headers.insert(HeaderName::from_static(header), value);
    }
    if let Some(value) = header_value(param) {
        headers.insert(HeaderName::from_static(PARAMS_HEADER), value);
    }
    headers
}

/// Alert headers for a successful create/update/delete, e.g.
/// `budgetaryApp.income.created` with the id as parameter.
pub fn entity_alert(entity: &str, action: &str, id: &str) -> HeaderMap {
    alert(
        ALERT_HEADER,
        &format!("{}.{}.{}", APPLICATION_NAME, entity, action),
        id,
    )
}

/// Error headers for a rejected request, e.g. `error.idexists` with the
/// entity name as parameter.
pub fn failure_alert(entity: &str, error_key: &str) -> HeaderMap {
    alert(ERROR_HEADER, &format!("error.{}", error_key), entity)
}
