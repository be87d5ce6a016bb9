use crate::dump::pools::PoolProperties;
use crate::dump::row::{Row, RowReader, SourceTag};
use crate::error::{ZinferError, ZinferResult};
use crate::model::{Dataset, ParsedForest, Pool, is_descendant};
use crate::props::tables::is_status;
use crate::props::{Property, Source};
use log::debug;

/// What the scanner found next in a `zfs get all` dump.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// A complete dataset belonging to the pool being scanned.
    Dataset(Dataset),
    /// Rows for another pool start here; nothing has been consumed.
    PoolBoundary(String),
    EndOfInput,
}

/// Parse a `zfs get all` dump into pools, attaching each pool's `zpool get all` properties.
pub fn parse_datasets(text: &str, pool_props: &PoolProperties) -> ZinferResult<ParsedForest> {
    let mut scanner = DatasetScanner::new(text)?;
    let mut forest = ParsedForest::default();

    let mut next = scanner.peek()?.map(|row| row.entity.to_string());
    while let Some(root) = next {
        let (mut pool, boundary) = scanner.scan_pool(&root)?;

        let props = pool_props
            .get(&pool.name)
            .ok_or_else(|| ZinferError::MissingPoolProperties(pool.name.clone()))?;
        pool.set_properties(props.clone());

        if forest.pools.contains_key(&pool.name) {
            return Err(ZinferError::DuplicatePool(pool.name));
        }
        debug!(
            "parsed pool {} with {} datasets",
            pool.name,
            pool.datasets().len()
        );
        forest.pools.insert(pool.name.clone(), pool);
        next = boundary;
    }

    Ok(forest)
}

struct DatasetScanner<'a> {
    reader: RowReader<'a>,
    pending: Option<Row<'a>>,
}

impl<'a> DatasetScanner<'a> {
    fn new(text: &'a str) -> ZinferResult<Self> {
        Ok(Self {
            reader: RowReader::new(text)?,
            pending: None,
        })
    }

    fn peek(&mut self) -> ZinferResult<Option<&Row<'a>>> {
        if self.pending.is_none() {
            self.pending = self.reader.next_row()?;
        }
        Ok(self.pending.as_ref())
    }

    /// Consume the next row only if it belongs to `entity`.
    fn next_row_of(&mut self, entity: &str) -> ZinferResult<Option<Row<'a>>> {
        let same = self.peek()?.is_some_and(|row| row.entity == entity);
        Ok(if same { self.pending.take() } else { None })
    }

    /// Scan every dataset of the pool rooted at `root`. Returns the pool and the
    /// name that starts the following pool, if any.
    fn scan_pool(&mut self, root: &str) -> ZinferResult<(Pool, Option<String>)> {
        let mut pool = Pool::new(root)?;
        loop {
            match self.next_dataset(&pool)? {
                ParseOutcome::Dataset(dataset) => pool.add_dataset(dataset)?,
                ParseOutcome::PoolBoundary(next) => return Ok((pool, Some(next))),
                ParseOutcome::EndOfInput => return Ok((pool, None)),
            }
        }
    }

    fn next_dataset(&mut self, pool: &Pool) -> ZinferResult<ParseOutcome> {
        let name = match self.peek()? {
            None => return Ok(ParseOutcome::EndOfInput),
            Some(row) if row.entity != pool.name && !is_descendant(row.entity, &pool.name) => {
                return Ok(ParseOutcome::PoolBoundary(row.entity.to_string()));
            }
            Some(row) => row.entity,
        };

        let mut dataset = Dataset::new(name);
        while let Some(row) = self.next_row_of(name)? {
            let source = dataset_source(&row, pool)?;
            dataset.insert(Property::new(row.property, row.value, source))?;
        }
        Ok(ParseOutcome::Dataset(dataset))
    }
}

/// Classify a dataset row's source. Inherited rows must name a dataset already
/// parsed in this pool that carries the same property with the same value.
fn dataset_source(row: &Row<'_>, pool: &Pool) -> ZinferResult<Source> {
    if is_status(row.property) && row.tag != SourceTag::ReadOnly {
        return Err(ZinferError::ExpectedReadonly {
            dataset: row.entity.to_string(),
            property: row.property.to_string(),
        });
    }

    match (row.tag, row.parent) {
        (SourceTag::ReadOnly, None) => Ok(Source::ReadOnly),
        (SourceTag::Default, None) => Ok(Source::Default),
        (SourceTag::Local, None) => Ok(Source::Local),
        (SourceTag::Temporary, None) => Ok(Source::Temporary),
        (SourceTag::InheritedFrom, Some(parent)) => {
            let parent_set = pool
                .dataset(parent)
                .ok_or_else(|| ZinferError::ParentNotFound {
                    dataset: row.entity.to_string(),
                    parent: parent.to_string(),
                })?;
            let parent_prop =
                parent_set
                    .property(row.property)
                    .ok_or_else(|| ZinferError::ParentMissingProperty {
                        dataset: row.entity.to_string(),
                        parent: parent.to_string(),
                        property: row.property.to_string(),
                    })?;

            let expected = parent_prop.effective_value(pool);
            if row.value != expected {
                return Err(ZinferError::InheritedMismatch {
                    dataset: row.entity.to_string(),
                    property: row.property.to_string(),
                    parent: parent.to_string(),
                    value: row.value.to_string(),
                    expected: expected.to_string(),
                });
            }
            Ok(Source::Inherited {
                parent: parent.to_string(),
            })
        }
        _ => Err(ZinferError::InvalidSource {
            entity: row.entity.to_string(),
            property: row.property.to_string(),
            source_tag: row.source_text(),
        }),
    }
}
