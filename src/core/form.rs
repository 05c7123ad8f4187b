use crate::domain::model::{FormData, MetricPayload, Strategy};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use serde_json::Number;

/// Convert a raw input value to a JSON number.
///
/// Empty input is `None`. Integers stay integers so the backend receives `90`, not `90.0`.
/// Input that is not a finite number is also `None`, which is what a NaN serializes to.
pub fn to_nullable_number(raw: Option<&str>) -> Option<Number> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(int) = value.parse::<i64>() {
        return Some(Number::from(int));
    }

    match value.parse::<f64>() {
        // "1e3", "90." and "5.0" are whole numbers and go out as integers.
        Ok(float) if float.is_finite()
            && float.fract() == 0.0
            && float >= i64::MIN as f64
            && float < i64::MAX as f64 =>
        {
            Some(Number::from(float as i64))
        }
        Ok(float) => Number::from_f64(float),
        Err(_) => {
            tracing::warn!("Ignoring non-numeric form value '{}'", value);
            None
        }
    }
}

fn to_nullable_string(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Map form fields onto the create payload.
pub fn build_payload(form: &FormData) -> Result<MetricPayload> {
    let url = validate_required_field("url", form.get("url"))?.to_string();

    let strategy = match form.get("strategy").filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<Strategy>()?,
        None => Strategy::Mobile,
    };

    let number = |name: &str| to_nullable_number(form.get(name));

    Ok(MetricPayload {
        url,
        run_datetime: to_nullable_string(form.get("run_datetime")),
        strategy,
        score_performance: number("score_performance"),
        score_accessibility: number("score_accessibility"),
        score_best_practices: number("score_best_practices"),
        score_seo: number("score_seo"),
        fcp_ms: number("fcp_ms"),
        lcp_ms: number("lcp_ms"),
        inp_ms: number("inp_ms"),
        ttfb_ms: number("ttfb_ms"),
        cls: number("cls"),
        speed_index_ms: number("speed_index_ms"),
        tbt_ms: number("tbt_ms"),
        total_requests: number("total_requests"),
        total_transfer_kb: number("total_transfer_kb"),
        notes: to_nullable_string(form.get("notes")),
    })
}
