//! Query string and form body decoding

use std::collections::HashMap;

/// Decode the URL query and a form-encoded body into one flat map.
///
/// Body parameters are applied last, so they override query parameters of
/// the same name. Repeated keys keep their last value.
pub fn parse_params(query: Option<&str>, body: &[u8]) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if let Some(query) = query {
        extend(&mut params, query.as_bytes());
    }
    extend(&mut params, body);

    params
}

fn extend(params: &mut HashMap<String, String>, input: &[u8]) {
    for (key, value) in url::form_urlencoded::parse(input) {
        if key.is_empty() {
            continue;
        }
        params.insert(key.into_owned(), value.into_owned());
    }
}
