//! Service-level error detection, run on every payload before mapping.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::Error;

/// Checks the raw response text for an embedded service error.
///
/// The service reports application errors inside an otherwise well-formed
/// payload: `<data><error>message</error></data>`, optionally with a numeric
/// `id` attribute on the error element. This runs on every successful HTTP
/// fetch before the mapper sees the payload. Text that is not even parseable
/// markup passes through unchanged; the mapper owns that failure mode.
pub(crate) fn check_for_errors(body: &str) -> Result<(), Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut in_error = false;
    let mut code: Option<i32> = None;
    let mut message = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"error" => {
                in_error = true;
                code = error_code(&e);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"error" => {
                return Err(Error::Service {
                    code: error_code(&e),
                    message: String::new(),
                });
            }
            Ok(Event::Text(t)) if in_error => {
                if let Ok(text) = t.unescape() {
                    message.push_str(&text);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"error" => {
                return Err(Error::Service { code, message });
            }
            Ok(Event::Eof) => return Ok(()),
            // Not our failure mode; the mapper reports malformed markup.
            Err(_) => return Ok(()),
            _ => {}
        }
    }
}

fn error_code(e: &quick_xml::events::BytesStart) -> Option<i32> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"id" {
            return String::from_utf8_lossy(&attr.value).parse().ok();
        }
    }
    None
}
