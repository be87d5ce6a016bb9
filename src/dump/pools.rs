use crate::dump::row::{Row, RowReader, SourceTag};
use crate::error::{ZinferError, ZinferResult};
use crate::props::{Property, Source};
use std::collections::BTreeMap;

/// Pool-level properties from `zpool get all`, keyed by pool then property.
pub type PoolProperties = BTreeMap<String, BTreeMap<String, Property>>;

/// Parse a `zpool get all` dump.
///
/// Rows for one pool must be contiguous; a pool that reappears after another
/// pool's rows is rejected.
pub fn parse_pool_properties(text: &str) -> ZinferResult<PoolProperties> {
    let mut reader = RowReader::new(text)?;

    let mut out = PoolProperties::new();
    let mut current: Option<(String, BTreeMap<String, Property>)> = None;

    while let Some(row) = reader.next_row()? {
        if current.as_ref().is_none_or(|(name, _)| name != row.entity) {
            if out.contains_key(row.entity) {
                return Err(ZinferError::DuplicatePool(row.entity.to_string()));
            }
            if let Some((name, props)) = current.take() {
                out.insert(name, props);
            }
            current = Some((row.entity.to_string(), BTreeMap::new()));
        }

        let prop = Property::new(row.property, row.value, pool_source(&row)?);
        if let Some((name, props)) = current.as_mut() {
            if props.contains_key(row.property) {
                return Err(ZinferError::DuplicateProperty {
                    entity: name.clone(),
                    property: row.property.to_string(),
                });
            }
            props.insert(prop.name.clone(), prop);
        }
    }

    if let Some((name, props)) = current {
        out.insert(name, props);
    }
    Ok(out)
}

/// Pools have no parents, so only fixed, default and local values make sense.
fn pool_source(row: &Row<'_>) -> ZinferResult<Source> {
    match (row.tag, row.parent) {
        (SourceTag::ReadOnly, None) => Ok(Source::ReadOnly),
        (SourceTag::Default, None) => Ok(Source::Default),
        (SourceTag::Local, None) => Ok(Source::Local),
        _ => Err(ZinferError::InvalidSource {
            entity: row.entity.to_string(),
            property: row.property.to_string(),
            source_tag: row.source_text(),
        }),
    }
}
