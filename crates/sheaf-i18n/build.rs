//! Build script for sheaf-i18n
//!
//! Validates the bundled Fluent catalogs before they are embedded:
//! - every file parses
//! - every message id is `<namespace>-<code>`
//! - every variable is a positional `argN`
//! - all locales carry the same ids with the same placeholders

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use fluent_syntax::ast::{Entry, Expression, InlineExpression, Pattern, PatternElement};
use fluent_syntax::parser::parse;

const NAMESPACE: &str = "sheaf";
const REFERENCE_LOCALE: &str = "en";

type Placeholders = BTreeSet<String>;

fn extract_messages(content: &str) -> Result<BTreeMap<String, Placeholders>, String> {
    let resource = parse(content).map_err(|(_, errors)| format!("Parse errors: {errors:?}"))?;

    let mut messages = BTreeMap::new();
    for entry in resource.body {
        if let Entry::Message(message) = entry {
            let id = message.id.name.to_string();
            let mut params = BTreeSet::new();
            if let Some(Pattern { elements }) = &message.value {
                extract_from_pattern(elements, &mut params);
            }
            for attribute in &message.attributes {
                extract_from_pattern(&attribute.value.elements, &mut params);
            }
            messages.insert(id, params);
        }
    }
    Ok(messages)
}

fn extract_from_pattern(elements: &[PatternElement<&str>], params: &mut Placeholders) {
    for element in elements {
        if let PatternElement::Placeable { expression } = element {
            extract_from_expression(expression, params);
        }
    }
}

fn extract_from_expression(expression: &Expression<&str>, params: &mut Placeholders) {
    match expression {
        Expression::Select { selector, variants } => {
            extract_from_inline(selector, params);
            for variant in variants {
                extract_from_pattern(&variant.value.elements, params);
            }
        }
        Expression::Inline(inline) => extract_from_inline(inline, params),
    }
}

fn extract_from_inline(expression: &InlineExpression<&str>, params: &mut Placeholders) {
    match expression {
        InlineExpression::VariableReference { id } => {
            params.insert(id.name.to_string());
        }
        InlineExpression::FunctionReference { arguments, .. } => {
            for arg in &arguments.positional {
                extract_from_inline(arg, params);
            }
            for arg in &arguments.named {
                extract_from_inline(&arg.value, params);
            }
        }
        InlineExpression::Placeable { expression } => extract_from_expression(expression, params),
        InlineExpression::MessageReference { .. }
        | InlineExpression::TermReference { .. }
        | InlineExpression::StringLiteral { .. }
        | InlineExpression::NumberLiteral { .. } => {}
    }
}

fn is_code_id(id: &str) -> bool {
    id.strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('-'))
        .map(|code| code.strip_prefix('-').unwrap_or(code))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_positional(name: &str) -> bool {
    name.strip_prefix("arg")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn validate_file(path: &Path) -> Result<BTreeMap<String, Placeholders>, Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| vec![format!("Failed to read {}: {e}", path.display())])?;
    let messages = extract_messages(&content)
        .map_err(|e| vec![format!("Failed to parse {}: {e}", path.display())])?;

    let mut errors = Vec::new();
    for (id, params) in &messages {
        if !is_code_id(id) {
            errors.push(format!("message id '{id}' is not of the form '{NAMESPACE}-<code>'"));
        }
        for param in params {
            if !is_positional(param) {
                errors.push(format!("'{id}' uses placeholder '${param}', expected '$argN'"));
            }
        }
    }

    if errors.is_empty() {
        Ok(messages)
    } else {
        Err(errors)
    }
}

fn find_locale_files(locales_dir: &Path) -> Result<BTreeMap<String, PathBuf>, String> {
    let mut files = BTreeMap::new();
    let entries = fs::read_dir(locales_dir)
        .map_err(|e| format!("Failed to read {}: {e}", locales_dir.display()))?;

    for entry in entries {
        let path = entry.map_err(|e| format!("Failed to read directory entry: {e}"))?.path();
        if !path.is_dir() {
            continue;
        }
        let locale = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("Invalid locale directory name: {}", path.display()))?
            .to_string();
        let catalog = path.join(format!("{NAMESPACE}.ftl"));
        if catalog.exists() {
            files.insert(locale, catalog);
        }
    }

    if !files.contains_key(REFERENCE_LOCALE) {
        return Err(format!("Missing reference catalog {REFERENCE_LOCALE}/{NAMESPACE}.ftl"));
    }
    Ok(files)
}

fn validate_locales() -> Result<(), String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let locales_dir = Path::new(&manifest_dir).join("locales");
    println!("cargo:rerun-if-changed={}", locales_dir.display());

    let files = find_locale_files(&locales_dir)?;

    let mut catalogs = BTreeMap::new();
    let mut errors = Vec::new();
    for (locale, path) in &files {
        match validate_file(path) {
            Ok(messages) => {
                catalogs.insert(locale.clone(), messages);
            }
            Err(file_errors) => {
                errors.extend(file_errors.into_iter().map(|e| format!("{locale}: {e}")));
            }
        }
    }

    if let Some(reference) = catalogs.get(REFERENCE_LOCALE) {
        for (locale, messages) in &catalogs {
            if locale == REFERENCE_LOCALE {
                continue;
            }
            for (id, params) in reference {
                match messages.get(id) {
                    None => errors.push(format!("{locale}: missing message '{id}'")),
                    Some(found) if found != params => errors.push(format!(
                        "{locale}: placeholder mismatch for '{id}', expected {params:?}, found {found:?}"
                    )),
                    Some(_) => {}
                }
            }
            for id in messages.keys().filter(|id| !reference.contains_key(*id)) {
                errors.push(format!("{locale}: extra message '{id}'"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn main() {
    if let Err(e) = validate_locales() {
        eprintln!("Catalog validation failed:\n{e}");
        process::exit(1);
    }
}
