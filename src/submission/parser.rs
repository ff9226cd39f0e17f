use serde_json::{Map, Value};

/// Parse a submission body based on its Content-Type header.
///
/// An empty body yields `Value::Null` so that validation reports it as missing data.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let ct = content_type.unwrap_or("application/json");

    if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!("Rejected submission body: {e}");
            "invalid JSON body".to_string()
        })
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    std::str::from_utf8(body).map_err(|_| "invalid form body".to_string())?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}
