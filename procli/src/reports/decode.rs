//! Decode command report.

use serde_json::Value;

use super::output::{Output, Report};

/// The call input rebuilt from argv.
#[derive(Debug)]
pub struct DecodeReport {
    pub input: Value,
}

impl Report for DecodeReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("{:#}", self.input));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_pretty_json() {
        let report = DecodeReport {
            input: json!([1, { "verbose": true }]),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec!["[\n  1,\n  {\n    \"verbose\": true\n  }\n]"]
        );
    }
}
