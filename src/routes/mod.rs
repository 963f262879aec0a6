pub mod bar;
pub mod health;
pub mod share;

use poem::Request;
use url::form_urlencoded;

use crate::core::params::QueryParams;

/// Collects the request's query string. When a key repeats, the first value wins.
pub fn query_params(req: &Request) -> QueryParams {
    let mut params = QueryParams::new();
    let query = req.uri().query().unwrap_or_default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}
