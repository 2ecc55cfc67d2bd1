/// Shortest decimal that round-trips, so `82.74` prints as `82.74` and `5.0` as `5`.
pub fn format_value(v: f64) -> String {
    format!("{}", v)
}

pub fn human_sales(v: f64) -> String {
    format!("{} million", format_value(v))
}
