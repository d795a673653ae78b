//! Fluent bundle management and positional message formatting
//!
//! Arguments are exposed to templates as the variables `$arg0`, `$arg1`, ...
//! Before a template is resolved every placeholder it can reach is checked
//! against the supplied arguments, so a template never renders with a hole
//! where an argument should be.

use crate::argument::Argument;
use crate::error::{FormatDefect, I18nError, I18nResult};
use crate::Locale;
use fluent::{FluentArgs, FluentResource, FluentValue};
use fluent_bundle::concurrent::FluentBundle;
use fluent_syntax::ast::{Expression, InlineExpression, Pattern, PatternElement};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error};

/// Prefix of positional variable names
const ARG_PREFIX: &str = "arg";

/// Function that marks a placeholder as numeric
const NUMBER_FUNCTION: &str = "NUMBER";

type Bundle = FluentBundle<FluentResource>;

/// Manages one Fluent bundle per locale
pub struct BundleManager {
    bundles: HashMap<Locale, Bundle>,
}

impl std::fmt::Debug for BundleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleManager")
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BundleManager {
    /// Create an empty BundleManager
    #[must_use]
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    fn bundle_mut(&mut self, locale: Locale) -> I18nResult<&mut Bundle> {
        match self.bundles.entry(locale) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(new_bundle(locale)?)),
        }
    }

    /// Add a resource to a locale's bundle, creating the bundle on first use
    pub fn add_resource(&mut self, locale: Locale, resource: FluentResource) -> I18nResult<()> {
        let bundle = self.bundle_mut(locale)?;

        bundle.add_resource(resource).map_err(|errors| {
            let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
            error!("Failed to add resource to bundle for {}: {:?}", locale, errors);
            I18nError::BundleCreationError {
                locale: locale.code().to_string(),
                errors,
            }
        })?;

        debug!("Added resource to bundle for locale: {}", locale);
        Ok(())
    }

    /// Add a resource whose messages replace existing ones with the same id
    pub fn add_resource_overriding(&mut self, locale: Locale, resource: FluentResource) -> I18nResult<()> {
        let bundle = self.bundle_mut(locale)?;
        bundle.add_resource_overriding(resource);

        debug!("Added overriding resource to bundle for locale: {}", locale);
        Ok(())
    }

    /// Format message `id` of `locale` with positional `args`.
    ///
    /// Returns `Ok(None)` when the locale has no such message or the message
    /// has no value.
    pub fn format_message(
        &self,
        locale: Locale,
        id: &str,
        args: &[Argument],
    ) -> Result<Option<String>, FormatDefect> {
        let Some(bundle) = self.bundles.get(&locale) else {
            return Ok(None);
        };
        let Some(pattern) = bundle.get_message(id).and_then(|message| message.value()) else {
            return Ok(None);
        };

        PlaceholderCheck::new(bundle, id, args).pattern(pattern)?;

        let fluent_args = positional_args(args);
        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, Some(&fluent_args), &mut errors);

        if !errors.is_empty() {
            return Err(FormatDefect::Resolver {
                id: id.to_string(),
                errors: errors.into_iter().map(|e| format!("{e:?}")).collect(),
            });
        }

        Ok(Some(formatted.into_owned()))
    }

    /// Check if a message with a value exists in the locale's bundle
    #[must_use]
    pub fn has_message(&self, locale: Locale, id: &str) -> bool {
        self.bundles
            .get(&locale)
            .and_then(|bundle| bundle.get_message(id))
            .is_some_and(|message| message.value().is_some())
    }

    /// Get all locales with a bundle
    #[must_use]
    pub fn available_locales(&self) -> Vec<Locale> {
        self.bundles.keys().copied().collect()
    }
}

impl Default for BundleManager {
    fn default() -> Self {
        Self::new()
    }
}

fn new_bundle(locale: Locale) -> I18nResult<Bundle> {
    let mut bundle = FluentBundle::new_concurrent(vec![locale.to_language_identifier()?]);
    // Plain text output, no bidi isolation marks around placeables
    bundle.set_use_isolating(false);
    bundle
        .add_function(NUMBER_FUNCTION, number)
        .map_err(|e| I18nError::BundleCreationError {
            locale: locale.code().to_string(),
            errors: vec![format!("{e:?}")],
        })?;
    Ok(bundle)
}

/// `NUMBER($argN)`: passes a numeric argument through unchanged.
///
/// Integers too large for a Fluent number arrive as their decimal text and
/// are passed through as text.
fn number<'a>(positional: &[FluentValue<'a>], _named: &FluentArgs) -> FluentValue<'a> {
    match positional {
        [FluentValue::Number(n)] => FluentValue::Number(n.clone()),
        [FluentValue::String(s)] if s.parse::<i128>().is_ok() => FluentValue::String(s.clone()),
        _ => FluentValue::Error,
    }
}

fn positional_args(args: &[Argument]) -> FluentArgs<'_> {
    let mut fluent_args = FluentArgs::with_capacity(args.len());
    for (position, arg) in args.iter().enumerate() {
        fluent_args.set(format!("{ARG_PREFIX}{position}"), arg.to_fluent());
    }
    fluent_args
}

fn position_of(name: &str) -> Option<usize> {
    name.strip_prefix(ARG_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
}

/// Walks a template, following message references, and checks every
/// placeholder against the supplied arguments.
struct PlaceholderCheck<'a> {
    bundle: &'a Bundle,
    id: &'a str,
    args: &'a [Argument],
    visited: HashSet<&'a str>,
}

impl<'a> PlaceholderCheck<'a> {
    fn new(bundle: &'a Bundle, id: &'a str, args: &'a [Argument]) -> Self {
        let mut visited = HashSet::new();
        visited.insert(id);
        Self {
            bundle,
            id,
            args,
            visited,
        }
    }

    fn pattern(&mut self, pattern: &Pattern<&'a str>) -> Result<(), FormatDefect> {
        for element in &pattern.elements {
            if let PatternElement::Placeable { expression } = element {
                self.expression(expression)?;
            }
        }
        Ok(())
    }

    fn expression(&mut self, expression: &Expression<&'a str>) -> Result<(), FormatDefect> {
        match expression {
            Expression::Select { selector, variants } => {
                self.inline(selector)?;
                for variant in variants {
                    self.pattern(&variant.value)?;
                }
                Ok(())
            }
            Expression::Inline(inline) => self.inline(inline),
        }
    }

    fn inline(&mut self, expression: &InlineExpression<&'a str>) -> Result<(), FormatDefect> {
        match expression {
            InlineExpression::VariableReference { id } => self.argument(id.name).map(|_| ()),
            InlineExpression::FunctionReference { id, arguments } => {
                for arg in &arguments.positional {
                    match arg {
                        InlineExpression::VariableReference { id: var } if id.name == NUMBER_FUNCTION => {
                            self.numeric_argument(var.name)?;
                        }
                        other => self.inline(other)?,
                    }
                }
                for arg in &arguments.named {
                    self.inline(&arg.value)?;
                }
                Ok(())
            }
            InlineExpression::TermReference { arguments, .. } => {
                if let Some(arguments) = arguments {
                    for arg in &arguments.positional {
                        self.inline(arg)?;
                    }
                    for arg in &arguments.named {
                        self.inline(&arg.value)?;
                    }
                }
                Ok(())
            }
            InlineExpression::MessageReference { id, attribute } => {
                if !self.visited.insert(id.name) {
                    return Ok(());
                }
                let bundle: &'a Bundle = self.bundle;
                let Some(message) = bundle.get_message(id.name) else {
                    return Ok(());
                };
                let pattern = match attribute {
                    Some(attribute) => message.get_attribute(attribute.name).map(|a| a.value()),
                    None => message.value(),
                };
                match pattern {
                    Some(pattern) => self.pattern(pattern),
                    None => Ok(()),
                }
            }
            InlineExpression::Placeable { expression } => self.expression(expression),
            InlineExpression::StringLiteral { .. } | InlineExpression::NumberLiteral { .. } => Ok(()),
        }
    }

    fn argument(&self, name: &str) -> Result<(usize, &'a Argument), FormatDefect> {
        let position = position_of(name).ok_or_else(|| FormatDefect::UnknownPlaceholder {
            id: self.id.to_string(),
            name: name.to_string(),
        })?;
        let args: &'a [Argument] = self.args;
        args.get(position)
            .map(|arg| (position, arg))
            .ok_or_else(|| FormatDefect::MissingArgument {
                id: self.id.to_string(),
                position,
                supplied: self.args.len(),
            })
    }

    fn numeric_argument(&self, name: &str) -> Result<(), FormatDefect> {
        let (position, arg) = self.argument(name)?;
        if arg.is_numeric() {
            Ok(())
        } else {
            Err(FormatDefect::TypeMismatch {
                id: self.id.to_string(),
                position,
                expected: "number",
                found: arg.kind(),
            })
        }
    }
}
