use super::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Last-entered search/filter values keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from submitted name/value pairs, dropping empty values.
    /// A repeated name keeps its last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut filters = Self::new();
        for (name, value) in entries {
            let value = value.into();
            if !value.is_empty() {
                filters.0.insert(name.into(), value);
            }
        }
        filters
    }

    /// Parses a stored blob.
    ///
    /// Invalid JSON is an error. A JSON value that is not an object yields an
    /// empty set; non-string members are converted to their display form.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(members) = value else {
            return Ok(Self::new());
        };
        Ok(Self(
            members
                .into_iter()
                .map(|(name, value)| (name, display_value(&value)))
                .collect(),
        ))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

impl Page {
    pub(crate) fn install_filter_persistence(&mut self) -> Result<()> {
        let Some(form) = self.dom.query_selector(markup::FILTER_FORM)? else {
            return Ok(());
        };
        self.add_listener(
            ListenerTarget::Node(form),
            "submit",
            Handler::SaveFilters { form },
        );
        self.restore_filters(form)
    }

    pub(crate) fn save_filters(&mut self, form: NodeId) -> Result<()> {
        let filters = FilterSet::from_entries(forms::form_data_entries(&self.dom, form)?);
        let json = filters.to_json()?;
        self.storage.set_item(FILTER_STORAGE_KEY, &json)?;
        self.trace_line(format!("[storage] set {FILTER_STORAGE_KEY}={json}"));
        Ok(())
    }

    fn restore_filters(&mut self, form: NodeId) -> Result<()> {
        let Some(saved) = self.storage.get_item(FILTER_STORAGE_KEY) else {
            return Ok(());
        };
        if saved.is_empty() {
            return Ok(());
        }
        let filters = FilterSet::from_json(&saved)?;
        self.trace_line(format!(
            "[storage] restore {FILTER_STORAGE_KEY} fields={}",
            filters.len()
        ));

        let mut fields = Vec::new();
        self.dom.collect_elements_descendants_dfs(form, &mut fields);
        for (name, value) in filters.iter() {
            let Some(field) = fields
                .iter()
                .copied()
                .find(|node| self.dom.attr(*node, "name").as_deref() == Some(name))
            else {
                continue;
            };
            if forms::is_form_control(&self.dom, field) && !forms::is_file_input(&self.dom, field) {
                self.dom.set_value(field, value)?;
            }
        }
        Ok(())
    }

    /// Filters currently persisted in client storage.
    pub fn saved_filters(&self) -> Result<Option<FilterSet>> {
        match self.storage.get_item(FILTER_STORAGE_KEY) {
            Some(saved) if !saved.is_empty() => FilterSet::from_json(&saved).map(Some),
            _ => Ok(None),
        }
    }
}
