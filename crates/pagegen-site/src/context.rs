//! Template data-context construction.

use std::collections::BTreeMap;

use minijinja::Value;

use pagegen_config::SiteData;

/// Build the template data context from site configuration.
///
/// Scalars and arrays are exposed by name at the top level, so templates
/// reference `{{ title }}` directly and iterate `{% for p in post %}`.
/// If a scalar and an array share a name the array wins; the config
/// format makes that collision unlikely and the strict environment will
/// surface any surprise as a render error.
pub(crate) fn template_context(data: &SiteData) -> Value {
    let mut root: BTreeMap<&str, Value> = BTreeMap::new();

    for (key, value) in &data.scalars {
        root.insert(key, Value::from(value.clone()));
    }

    for (key, records) in &data.arrays {
        root.insert(key, Value::from_serialize(records));
    }

    Value::from_serialize(&root)
}
