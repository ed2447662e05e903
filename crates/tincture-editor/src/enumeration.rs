//! Combo-box binding for web-service enumeration types.
//!
//! A web-service package registers each enumeration type under a key of the
//! form `<namespace>.<type>`, where the namespace is the package namespace
//! with its `|Types` suffix removed. The selector shows the type's values and
//! persists the selected value verbatim.

use std::collections::HashMap;

use crate::error::WidgetError;
use crate::protocol::HostNotification;
use crate::widget::ConstantWidget;

const TYPES_SUFFIX: &str = "|Types";

/// Known enumeration types and their values.
#[derive(Debug, Clone, Default)]
pub struct EnumerationCatalog {
    types: HashMap<String, Vec<String>>,
}

impl EnumerationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup key for a type declared in `namespace`.
    pub fn key(namespace: &str, type_name: &str) -> String {
        let namespace = namespace.replace(TYPES_SUFFIX, "");
        format!("{namespace}.{type_name}")
    }

    pub fn register(&mut self, namespace: &str, type_name: &str, values: Vec<String>) {
        self.types.insert(Self::key(namespace, type_name), values);
    }

    pub fn values(&self, namespace: &str, type_name: &str) -> Option<&[String]> {
        self.types
            .get(&Self::key(namespace, type_name))
            .map(Vec::as_slice)
    }

    /// Build a selector for a parameter of the given type.
    pub fn selector(
        &self,
        namespace: &str,
        type_name: &str,
        stored: &str,
    ) -> Result<EnumerationSelector, WidgetError> {
        let values = self
            .values(namespace, type_name)
            .ok_or_else(|| WidgetError::UnknownEnumeration(Self::key(namespace, type_name)))?;
        EnumerationSelector::new(values.to_vec(), stored)
    }
}

/// Single-choice selector over an enumeration's values.
#[derive(Debug, Clone)]
pub struct EnumerationSelector {
    options: Vec<String>,
    current: usize,
    fell_back: bool,
    outbox: Vec<HostNotification>,
}

impl EnumerationSelector {
    /// Select `stored` if it is one of `options`, otherwise the first option.
    /// [`fell_back`](Self::fell_back) reports the latter; the host should then
    /// store [`contents`](ConstantWidget::contents) as the parameter's value.
    pub fn new(options: Vec<String>, stored: &str) -> Result<Self, WidgetError> {
        if options.is_empty() {
            return Err(WidgetError::EmptyEnumeration);
        }
        let found = options.iter().position(|o| o == stored);
        if found.is_none() {
            tracing::debug!(stored, fallback = %options[0], "stored value not in enumeration");
        }
        Ok(Self {
            current: found.unwrap_or(0),
            fell_back: found.is_none(),
            options,
            outbox: Vec::new(),
        })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &str {
        &self.options[self.current]
    }

    /// Whether construction replaced an unknown stored value.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    /// The user picked `index`. The host is notified even if the choice
    /// did not change.
    pub fn activate(&mut self, index: usize) -> Result<(), WidgetError> {
        if index >= self.options.len() {
            return Err(WidgetError::IndexOutOfBounds {
                index,
                len: self.options.len(),
            });
        }
        self.current = index;
        self.outbox.push(HostNotification::ContentsChanged {
            contents: self.options[index].clone(),
        });
        Ok(())
    }
}

impl ConstantWidget for EnumerationSelector {
    fn contents(&self) -> Result<String, WidgetError> {
        Ok(self.current().to_string())
    }

    fn set_contents(&mut self, value: &str, silent: bool) -> Result<(), WidgetError> {
        let index = self
            .options
            .iter()
            .position(|o| o == value)
            .ok_or_else(|| WidgetError::UnknownOption(value.to_string()))?;
        self.current = index;
        if !silent {
            self.outbox.push(HostNotification::ContentsChanged {
                contents: value.to_string(),
            });
        }
        Ok(())
    }

    fn poll_notifications(&mut self) -> Vec<HostNotification> {
        std::mem::take(&mut self.outbox)
    }
}
