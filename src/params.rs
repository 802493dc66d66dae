//! `{{name}}` placeholder substitution
//!
//! Runs on already-expanded text. Placeholders without a supplied value are
//! left as they are.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{EmbedError, Result};

static PARAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("param pattern is valid"));

/// Distinct placeholder names in order of first appearance
pub fn find_params(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PARAM_PATTERN.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every known placeholder with its value
pub fn substitute_params(text: &str, params: &HashMap<String, String>) -> String {
    PARAM_PATTERN
        .replace_all(text, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Parse a `name=value` argument
pub fn parse_param_arg(arg: &str) -> Result<(String, String)> {
    let Some((name, value)) = arg.split_once('=') else {
        return Err(EmbedError::config(format!("Parameter must be name=value: {}", arg)));
    };
    let name = name.trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid {
        return Err(EmbedError::config(format!("Invalid parameter name: {:?}", name)));
    }
    Ok((name.to_string(), value.to_string()))
}
