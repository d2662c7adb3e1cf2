use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDocument {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode document bytes with {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode a raw document payload into UTF-8: BOM -> caller charset hint ->
/// chardetng detection.
///
/// Hosts that hand over an already-decoded string skip this entirely; it
/// exists for transports that deliver bytes.
pub fn decode_document(
    bytes: &[u8],
    charset_hint: Option<&str>,
) -> Result<DecodedDocument, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = charset_hint {
        if let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedDocument, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedDocument {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins_over_hint() {
        let bytes = b"\xEF\xBB\xBFhello";
        let decoded = decode_document(bytes, Some("ISO-8859-1")).unwrap();
        assert_eq!(decoded.html, "hello");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn charset_hint_is_honored() {
        let bytes = b"caf\xe9";
        let decoded = decode_document(bytes, Some("ISO-8859-1")).unwrap();
        assert_eq!(decoded.html, "caf\u{e9}");
    }

    #[test]
    fn detection_kicks_in_without_hint() {
        let decoded = decode_document("plain ascii".as_bytes(), None).unwrap();
        assert_eq!(decoded.html, "plain ascii");
    }
}
