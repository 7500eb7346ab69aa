//! Tab-separated lexical tables: light-verb / nominal / adjectival mappings
//! (`verb \t dependent \t class`) and the structural correspondence table
//! (`scope \t label \t categories \t roles`).

use std::collections::HashMap;
use std::io;
use std::path::Path;

use tracing::{info, warn};
use vnsem_notation::parse_arg_label;
use vnsem_protocol::{ArgKind, ArgLabel, ClassId, PhraseCategories, ThematicRole};

use crate::error::ResourceError;
use crate::index::FrameResource;

/// One non-empty line of a mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Read rows with at least `min_fields` columns. `#` starts a comment line.
pub fn read_rows<R: io::Read>(reader: R, path: &Path, min_fields: usize) -> Result<Vec<TableRow>, ResourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ResourceError::Table { path: path.to_path_buf(), source })?;
        let line = record.position().map(|position| position.line()).unwrap_or_default();
        let fields: Vec<String> = record.iter().map(|field| field.trim().to_string()).collect();
        if fields.iter().all(String::is_empty) {
            continue;
        }
        if fields.len() < min_fields {
            return Err(ResourceError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {} tab-separated fields, found {}", min_fields, fields.len()),
            });
        }
        rows.push(TableRow { line, fields });
    }
    Ok(rows)
}

fn open(path: &Path) -> Result<std::fs::File, ResourceError> {
    std::fs::File::open(path).map_err(|source| ResourceError::Io { path: path.to_path_buf(), source })
}

/// Nested `verb lemma -> dependent lemma -> class` table. Dependent entries
/// keep file order; a repeated dependent replaces the earlier class.
#[derive(Debug, Clone, Default)]
pub struct LexicalTable {
    entries: HashMap<String, Vec<(String, ClassId)>>,
}

impl LexicalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, verb: impl Into<String>, dependent: impl Into<String>, class: ClassId) {
        let dependent = dependent.into();
        let entries = self.entries.entry(verb.into()).or_default();
        match entries.iter_mut().find(|(lemma, _)| *lemma == dependent) {
            Some(entry) => entry.1 = class,
            None => entries.push((dependent, class)),
        }
    }

    /// Dependent mappings for a verb lemma, `None` if the verb is not listed.
    pub fn get(&self, verb: &str) -> Option<&[(String, ClassId)]> {
        self.entries.get(verb).map(Vec::as_slice)
    }

    pub fn class_for(&self, verb: &str, dependent: &str) -> Option<&ClassId> {
        self.get(verb)?
            .iter()
            .find(|(lemma, _)| lemma == dependent)
            .map(|(_, class)| class)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build from `(verb, dependent, class id)` rows, dropping classes the
    /// resource does not define.
    pub fn from_rows<R, I>(rows: I, resource: &R) -> Self
    where
        R: FrameResource + ?Sized,
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut table = Self::new();
        for (verb, dependent, class) in rows {
            let class = ClassId::new(class);
            if resource.class_by_id(&class).is_none() {
                warn!(verb = %verb, dependent = %dependent, class = %class, "dropping mapping to unknown class");
                table.entries.entry(verb).or_default();
                continue;
            }
            table.insert(verb, dependent, class);
        }
        table
    }

    pub fn load<R: FrameResource + ?Sized>(path: impl AsRef<Path>, resource: &R) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let rows = read_rows(open(path)?, path, 3)?;
        let table = Self::from_rows(
            rows.into_iter().map(|row| {
                let mut fields = row.fields.into_iter();
                let verb = fields.next().unwrap_or_default();
                let dependent = fields.next().unwrap_or_default();
                let class = fields.next().unwrap_or_default();
                (verb, dependent, class)
            }),
            resource,
        );
        info!(path = %path.display(), mappings = table.len(), "loaded lexical mappings");
        Ok(table)
    }
}

/// One structural correspondence: an argument label, realized by a phrase of
/// one of `categories`, may fill any of `roles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRule {
    /// `None` applies to every class
    pub scope: Option<ClassId>,
    pub label: ArgKind,
    pub categories: PhraseCategories,
    pub roles: Vec<ThematicRole>,
}

impl RoleRule {
    fn applies(&self, label: &ArgLabel, category: PhraseCategories) -> bool {
        self.label == label.kind && (self.categories.is_all() || self.categories.intersects(category))
    }
}

/// Syntactic-argument-label to thematic-role correspondence table.
#[derive(Debug, Clone, Default)]
pub struct RoleMappings {
    rules: Vec<RoleRule>,
}

impl RoleMappings {
    pub fn new(rules: Vec<RoleRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: RoleRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Roles `label` may realize in `class` for a phrase of `category`, in
    /// rule order. Class-scoped rules shadow the generic ones.
    pub fn candidates(&self, class: &ClassId, label: &ArgLabel, category: PhraseCategories) -> Vec<ThematicRole> {
        let collect = |scoped: bool| {
            let mut roles: Vec<ThematicRole> = Vec::new();
            let rules = self.rules.iter().filter(|rule| match &rule.scope {
                Some(scope) => scoped && scope == class,
                None => !scoped,
            });
            for rule in rules.filter(|rule| rule.applies(label, category)) {
                for role in &rule.roles {
                    if !roles.contains(role) {
                        roles.push(*role);
                    }
                }
            }
            roles
        };

        let scoped = collect(true);
        if scoped.is_empty() {
            collect(false)
        } else {
            scoped
        }
    }

    pub fn load<R: FrameResource + ?Sized>(path: impl AsRef<Path>, resource: &R) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let rows = read_rows(open(path)?, path, 4)?;
        let mut mappings = Self::default();
        for row in rows {
            if let Some(rule) = parse_rule(&row, path, resource)? {
                mappings.push(rule);
            }
        }
        info!(path = %path.display(), rules = mappings.len(), "loaded role correspondences");
        Ok(mappings)
    }
}

fn parse_rule<R: FrameResource + ?Sized>(
    row: &TableRow,
    path: &Path,
    resource: &R,
) -> Result<Option<RoleRule>, ResourceError> {
    let malformed = |reason: String| ResourceError::MalformedRow { path: path.to_path_buf(), line: row.line, reason };
    let [scope, label, categories, roles] = [&row.fields[0], &row.fields[1], &row.fields[2], &row.fields[3]];

    let scope = match scope.as_str() {
        "*" => None,
        id => {
            let id = ClassId::new(id);
            if resource.class_by_id(&id).is_none() {
                warn!(class = %id, line = row.line, "dropping correspondence for unknown class");
                return Ok(None);
            }
            Some(id)
        }
    };

    let label = parse_arg_label(label).map_err(|e| malformed(e.to_string()))?.kind;

    let categories = if categories == "*" {
        PhraseCategories::all()
    } else {
        let mut set = PhraseCategories::empty();
        for name in categories.split('|') {
            set |= PhraseCategories::parse_name(name.trim())
                .ok_or_else(|| malformed(format!("unknown category `{}`", name)))?;
        }
        set
    };

    let roles = roles
        .split(',')
        .map(|role| role.trim().parse::<ThematicRole>().map_err(|e| malformed(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(RoleRule { scope, label, categories, roles }))
}
