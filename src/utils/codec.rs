//! テキスト変換（Base64 / JSON整形）
//!
//! すべて純粋関数。エディタの内容は呼び出し側が書き換える。

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::models::{CodecFlow, FormatMode};

/// 末尾ビットを許容するデコーダ。パディングは `strip_padding` で先に外す
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// JSONの入れ子の上限（解析・整形・判定で共通）
pub const MAX_JSON_DEPTH: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("テキストを入力してください")]
    EmptyInput,

    #[error("Base64デコード失敗: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("UTF-8として解釈できません: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("JSON解析エラー: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("JSONの入れ子が深すぎます ({0} > {MAX_JSON_DEPTH})")]
    TooDeep(usize),
}

/// 空白のみの入力を弾く
pub fn require_input(text: &str) -> Result<&str, CodecError> {
    if text.trim().is_empty() {
        return Err(CodecError::EmptyInput);
    }
    Ok(text)
}

/// UTF-8バイト列を標準Base64へ
pub fn encode(text: &str) -> String {
    FORGIVING.encode(text.as_bytes())
}

/// atob と同じパディング規則。4文字単位の時だけ末尾の `=` を2個まで外す
fn strip_padding(compact: &str) -> Result<&str, CodecError> {
    let mut body = compact;
    if body.len() % 4 == 0 {
        body = body.strip_suffix('=').unwrap_or(body);
        body = body.strip_suffix('=').unwrap_or(body);
    }
    if body.contains('=') {
        return Err(CodecError::InvalidBase64(base64::DecodeError::InvalidPadding));
    }
    Ok(body)
}

/// Base64をUTF-8テキストへ戻す
pub fn decode(base64: &str) -> Result<String, CodecError> {
    // atob同様、ASCII空白は無視する
    let compact: String = base64.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = FORGIVING.decode(strip_padding(&compact)?)?;
    Ok(String::from_utf8(bytes)?)
}

/// 入力チェック込みのエンコード/デコード
pub fn transcode(flow: CodecFlow, text: &str) -> Result<String, CodecError> {
    let text = require_input(text)?;
    match flow {
        CodecFlow::Encode => Ok(encode(text)),
        CodecFlow::Decode => decode(text),
    }
}

/// 括弧の最大の入れ子数（文字列リテラル内は数えない）
fn nesting_depth(text: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for b in text.bytes() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// 判定と整形が共有するパーサ
fn parse_json(text: &str) -> Result<serde_json::Value, CodecError> {
    let depth = nesting_depth(text);
    if depth > MAX_JSON_DEPTH {
        return Err(CodecError::TooDeep(depth));
    }
    // serde_json 既定の128段制限を外し、上の上限で代替する
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = serde_json::Value::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

/// JSONを再シリアライズする。解析に失敗した場合は Err（内容は変更しない）
pub fn format_json(text: &str, mode: FormatMode) -> Result<String, CodecError> {
    let value = parse_json(text)?;
    match mode {
        FormatMode::Minify => Ok(serde_json::to_string(&value)?),
        FormatMode::Pretty => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
            Ok(String::from_utf8(buf)?)
        }
    }
}

/// ボタン活性判定用。true なら `format_json` も必ず成功する
pub fn is_valid_json(text: &str) -> bool {
    parse_json(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multibyte_round_trip() {
        let encoded = encode("café");
        assert_eq!(encoded, "Y2Fmw6k=");
        assert_eq!(decode(&encoded).unwrap(), "café");
    }

    #[test]
    fn test_encode_standard_alphabet() {
        assert_eq!(encode("hello"), "aGVsbG8=");
        assert_eq!(encode("日本語"), "5pel5pys6Kqe");
        assert_eq!(encode("😀"), "8J+YgA==");
        assert_eq!(encode("??>"), "Pz8+");
    }

    #[test]
    fn test_decode_is_forgiving_like_atob() {
        assert_eq!(decode("aGVs\nbG8=").unwrap(), "hello");
        assert_eq!(decode("aGVsbG8").unwrap(), "hello");
        assert_eq!(decode("  Y2Fmw6k=  ").unwrap(), "café");
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(decode("!!!!"), Err(CodecError::InvalidBase64(_))));
        assert!(matches!(decode("a"), Err(CodecError::InvalidBase64(_))));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        // 0xFF 0xFE
        assert!(matches!(decode("//4="), Err(CodecError::InvalidUtf8(_))));
    }

    #[test]
    fn test_transcode_rejects_blank_input() {
        assert!(matches!(transcode(CodecFlow::Encode, ""), Err(CodecError::EmptyInput)));
        assert!(matches!(transcode(CodecFlow::Decode, " \n\t"), Err(CodecError::EmptyInput)));
        assert_eq!(transcode(CodecFlow::Encode, "a").unwrap(), "YQ==");
    }

    #[test]
    fn test_minify_scenario() {
        let input = r#"{"a":1,"b":[1,2]}"#;
        assert_eq!(format_json(input, FormatMode::Minify).unwrap(), input);

        let spaced = "{ \"a\" : 1,\n  \"b\" : [ 1, 2 ] }";
        assert_eq!(format_json(spaced, FormatMode::Minify).unwrap(), input);
    }

    #[test]
    fn test_pretty_uses_tabs() {
        let pretty = format_json(r#"{"a":1,"b":[1,2]}"#, FormatMode::Pretty).unwrap();
        assert_eq!(pretty, "{\n\t\"a\": 1,\n\t\"b\": [\n\t\t1,\n\t\t2\n\t]\n}");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let input = r#"{"z":1,"a":2,"m":3}"#;
        assert_eq!(format_json(input, FormatMode::Minify).unwrap(), input);
    }

    #[test]
    fn test_format_idempotent() {
        let input = r#"{"name":"テスト","list":[{"x":null},true,1.5],"empty":{}}"#;
        for mode in [FormatMode::Minify, FormatMode::Pretty] {
            let once = format_json(input, mode).unwrap();
            let twice = format_json(&once, mode).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_invalid_json_leaves_content() {
        let input = String::from("{\"a\":");
        assert!(!is_valid_json(&input));
        assert!(format_json(&input, FormatMode::Pretty).is_err());
        assert_eq!(input, "{\"a\":");
    }

    #[test]
    fn test_is_valid_json() {
        assert!(is_valid_json("{}"));
        assert!(is_valid_json(" [1, 2] "));
        assert!(is_valid_json("\"text\""));
        assert!(is_valid_json("42"));
        assert!(!is_valid_json(""));
        assert!(!is_valid_json("{a:1}"));
        assert!(!is_valid_json("[1,]"));
    }

    #[test]
    fn test_decode_padding_follows_atob() {
        assert_eq!(decode("YQ==").unwrap(), "a");
        assert_eq!(decode("YQ").unwrap(), "a");
        assert_eq!(decode("YWJj").unwrap(), "abc");
        // 4文字単位でない位置のパディングは不正
        assert!(matches!(decode("YQ="), Err(CodecError::InvalidBase64(_))));
        assert!(matches!(decode("YWJj="), Err(CodecError::InvalidBase64(_))));
        assert!(matches!(decode("YQ===="), Err(CodecError::InvalidBase64(_))));
        assert!(matches!(decode("Y=Q="), Err(CodecError::InvalidBase64(_))));
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_deep_json_is_valid_and_formats() {
        let text = nested_arrays(200);
        assert!(is_valid_json(&text));
        assert_eq!(format_json(&text, FormatMode::Minify).unwrap(), text);
        assert!(format_json(&text, FormatMode::Pretty).is_ok());

        let limit = nested_arrays(MAX_JSON_DEPTH);
        assert!(is_valid_json(&limit));
        assert!(format_json(&limit, FormatMode::Minify).is_ok());
    }

    #[test]
    fn test_too_deep_json_rejected_by_both() {
        let text = nested_arrays(MAX_JSON_DEPTH + 1);
        assert!(!is_valid_json(&text));
        assert!(matches!(
            format_json(&text, FormatMode::Minify),
            Err(CodecError::TooDeep(d)) if d == MAX_JSON_DEPTH + 1
        ));
    }

    #[test]
    fn test_brackets_inside_strings_do_not_count() {
        let text = format!(r#"["{}", "\"{}"]"#, "[".repeat(600), "{".repeat(600));
        assert!(is_valid_json(&text));
        assert!(format_json(&text, FormatMode::Minify).is_ok());
    }

    #[test]
    fn test_large_number_keeps_literal() {
        assert!(is_valid_json("1e400"));
        assert_eq!(format_json("1e400", FormatMode::Minify).unwrap(), "1e400");
        assert_eq!(
            format_json(r#"{"n":123456789012345678901234567890}"#, FormatMode::Minify).unwrap(),
            r#"{"n":123456789012345678901234567890}"#
        );
    }

    #[test]
    fn test_validity_agrees_with_format_on_edge_inputs() {
        let cases = [
            r#"["\ud800"]"#,
            r#""\udc00x""#,
            "1e400",
            "-0",
            "[1e-400]",
            "{\"a\":1}   ",
            "{\"a\":1} x",
            "\u{feff}{}",
            "nul",
        ];
        for text in cases {
            for mode in [FormatMode::Minify, FormatMode::Pretty] {
                assert_eq!(is_valid_json(text), format_json(text, mode).is_ok(), "{text:?}");
            }
        }
    }

    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        use serde_json::Value;
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::from),
            ".*".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec((".*", inner), 0..6)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    fn arb_text() -> impl Strategy<Value = String> {
        prop_oneof![
            ".*",
            "[\\[\\]{}\",:0-9a-z\\\\ .eE+-]{0,40}",
            arb_json().prop_map(|v| v.to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_serialized_json_is_valid(v in arb_json()) {
            prop_assert!(is_valid_json(&v.to_string()));
        }

        #[test]
        fn prop_format_idempotent(v in arb_json()) {
            let text = v.to_string();
            for mode in [FormatMode::Minify, FormatMode::Pretty] {
                let once = format_json(&text, mode).unwrap();
                let twice = format_json(&once, mode).unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn prop_validity_matches_format_success(text in arb_text()) {
            let valid = is_valid_json(&text);
            prop_assert_eq!(valid, format_json(&text, FormatMode::Minify).is_ok());
            prop_assert_eq!(valid, format_json(&text, FormatMode::Pretty).is_ok());
        }

        #[test]
        fn prop_decode_inverts_encode(s in any::<String>()) {
            prop_assert_eq!(decode(&encode(&s)).unwrap(), s);
        }

        #[test]
        fn prop_encoded_uses_standard_alphabet(s in any::<String>()) {
            let encoded = encode(&s);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
        }
    }
}
