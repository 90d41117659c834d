// Decoder for the hddtemp daemon response:
// |/dev/sda|MODEL-X|42|C||/dev/sdb|MODEL-Y|38|C|

use crate::error::TelemetryError;
use crate::units::Scale;

const FIELDS_PER_RECORD: usize = 4;

/// One drive as reported by the daemon, in the scale the daemon used.
#[derive(Debug, Clone, PartialEq)]
pub struct HddTempRecord {
    pub device: String,
    pub model: String,
    pub temperature: f64,
    pub scale: Scale,
}

/// Result of decoding a full response: good records plus the per-record errors that were skipped.
#[derive(Debug, Default)]
pub struct ParsedResponse {
    pub records: Vec<HddTempRecord>,
    pub skipped: Vec<TelemetryError>,
}

/// Decode a full response.
///
/// A token count that is not a multiple of four cannot be resynchronized and fails the whole
/// response. A record whose temperature or scale does not parse (the daemon sends `UNK`/`SLP`
/// with scale `*` for unknown or sleeping drives) is skipped and reported in `skipped`.
pub fn parse_response(raw: &str) -> Result<ParsedResponse, TelemetryError> {
    let body = raw.trim();
    let body = body.strip_prefix('|').unwrap_or(body);
    let body = body.strip_suffix('|').unwrap_or(body);
    if body.is_empty() {
        return Ok(ParsedResponse::default());
    }

    let body = body.replace("||", "|");
    let tokens: Vec<&str> = body.split('|').collect();
    if tokens.len() % FIELDS_PER_RECORD != 0 {
        return Err(TelemetryError::protocol(format!(
            "expected a multiple of {} fields, got {}",
            FIELDS_PER_RECORD,
            tokens.len()
        )));
    }

    let mut parsed = ParsedResponse::default();
    for chunk in tokens.chunks_exact(FIELDS_PER_RECORD) {
        match parse_record(chunk) {
            Ok(record) => parsed.records.push(record),
            Err(e) => parsed.skipped.push(e),
        }
    }
    Ok(parsed)
}

fn parse_record(fields: &[&str]) -> Result<HddTempRecord, TelemetryError> {
    let [device, model, temperature, scale] = fields else {
        return Err(TelemetryError::protocol("record must have 4 fields"));
    };
    let temperature: f64 = temperature.trim().parse().map_err(|_| {
        TelemetryError::protocol(format!("{}: bad temperature {:?}", device, temperature))
    })?;
    let scale = Scale::from_symbol(scale)
        .ok_or_else(|| TelemetryError::protocol(format!("{}: bad scale {:?}", device, scale)))?;
    Ok(HddTempRecord {
        device: device.to_string(),
        model: model.trim().to_string(),
        temperature,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_with_wrong_arity_is_rejected() {
        assert!(parse_record(&["/dev/sda", "X", "40"]).is_err());
    }

    #[test]
    fn record_trims_model_and_temperature() {
        let r = parse_record(&["/dev/sda", " WDC WD10 ", " 41 ", "C"]).unwrap();
        assert_eq!(r.model, "WDC WD10");
        assert_eq!(r.temperature, 41.0);
    }
}
