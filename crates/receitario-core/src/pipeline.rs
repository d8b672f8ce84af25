//! # Generation Pipeline
//!
//! Load the raw dump, enrich every recipe, derive the category counts,
//! render the module and write it in one atomic step.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::emit::{DatasetEmitter, EmitterConfig};
use crate::enrich::{RecipeEnricher, Rules};
use crate::error::{ReceitarioError, Result};
use crate::types::{ALL_CATEGORIES_ID, CategoryEntry, EnrichedRecipe, RawRecipe, category_counts};

/// Raw dump read when no input path is given.
pub const DEFAULT_INPUT: &str = "Receitas GlicoBem Json.txt";

/// Module written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "data/recipes.ts";

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Rule table file; the built-in table is used when `None`.
    pub rules: Option<PathBuf>,
    /// Enrich and render without writing the output.
    pub dry_run: bool,
    pub emitter: EmitterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            rules: None,
            dry_run: false,
            emitter: EmitterConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn with_rules(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules = Some(path.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_emitter(mut self, emitter: EmitterConfig) -> Self {
        self.emitter = emitter;
        self
    }
}

/// An enriched collection together with its derived category counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub recipes: Vec<EnrichedRecipe>,
    pub categories: Vec<CategoryEntry>,
}

impl Dataset {
    /// Enriches `raws` in order, numbering them from 1.
    #[must_use]
    pub fn build(enricher: &RecipeEnricher, raws: &[RawRecipe]) -> Self {
        let recipes: Vec<EnrichedRecipe> = (1u32..)
            .zip(raws)
            .map(|(id, raw)| enricher.enrich(raw, id))
            .collect();
        let categories = category_counts(recipes.iter().map(|r| r.category));
        Self {
            recipes,
            categories,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.recipes.len()
    }
}

/// Parses the raw dump: a JSON array of recipe objects.
///
/// Records are decoded one at a time so a failure names the offending
/// record.
///
/// # Errors
///
/// Returns `ReceitarioError::MalformedInput` if the text is not a JSON
/// array, or `ReceitarioError::MalformedRecipe` for the first record with a
/// missing or wrong-typed field.
pub fn parse_raw_recipes(json: &str) -> Result<Vec<RawRecipe>> {
    let values: Vec<Value> =
        serde_json::from_str(json).map_err(|e| ReceitarioError::MalformedInput {
            reason: format!("expected a JSON array of recipes: {e}"),
        })?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let title = value
                .get("titulo")
                .and_then(Value::as_str)
                .map(str::to_owned);
            serde_json::from_value(value).map_err(|source| ReceitarioError::MalformedRecipe {
                index: i + 1,
                title,
                source,
            })
        })
        .collect()
}

/// Reads and parses the raw dump at `path`.
///
/// # Errors
///
/// Returns `ReceitarioError::InputNotFound` if the file cannot be read,
/// `ReceitarioError::MalformedInput` if it is not UTF-8, otherwise the
/// errors of [`parse_raw_recipes`].
pub fn load_raw_recipes(path: &Path) -> Result<Vec<RawRecipe>> {
    let bytes = std::fs::read(path).map_err(|source| ReceitarioError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let json = String::from_utf8(bytes).map_err(|e| ReceitarioError::MalformedInput {
        reason: format!("input is not valid UTF-8: {e}"),
    })?;
    parse_raw_recipes(&json)
}

/// Writes `contents` to `path` through a temporary file in the same
/// directory, so readers never see a partially written module.
///
/// Missing parent directories are created. A rewritten module keeps the
/// permissions of the file it replaces; a new one gets the same mode a plain
/// create would (`0o666` minus the umask on Unix).
///
/// # Errors
///
/// Returns `ReceitarioError::OutputWriteFailure` on any I/O failure; the
/// destination is left untouched in that case.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let fail = |source: std::io::Error| ReceitarioError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(fail)?;

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // masked by the umask at creation, like File::create
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(parent).map_err(fail)?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(fail)?;
    }
    tmp.write_all(contents.as_bytes()).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}

/// Outcome of a run: totals and counts for the summary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub total: usize,
    /// Registry entries with live counts, `all` first.
    pub categories: Vec<CategoryEntry>,
    /// Destination written, `None` on a dry run.
    pub output: Option<PathBuf>,
    /// Size of the rendered module in bytes.
    pub bytes: usize,
}

impl GenerationReport {
    /// Count for a registry id, including `all`.
    #[must_use]
    pub fn count(&self, id: &str) -> Option<usize> {
        self.categories.iter().find(|e| e.id == id).map(|e| e.count)
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total de receitas: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "Estatísticas por categoria:")?;
        for entry in self.categories.iter().filter(|e| e.id != ALL_CATEGORIES_ID) {
            writeln!(f, "  {}: {} receitas", entry.id, entry.count)?;
        }
        Ok(())
    }
}

/// The full load → enrich → render → write run.
pub struct Pipeline {
    config: PipelineConfig,
    enricher: RecipeEnricher,
    emitter: DatasetEmitter,
}

impl Pipeline {
    /// # Errors
    ///
    /// Fails if the rule table cannot be loaded or validated, or if the
    /// emitter names are not valid identifiers.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let rules = match config.rules {
            Some(ref path) => {
                info!(path = %path.display(), "loading enrichment rules");
                Rules::from_path(path)?
            }
            None => Rules::builtin()?,
        };
        let enricher = RecipeEnricher::new(rules)?;
        let emitter = DatasetEmitter::new(config.emitter.clone())?;
        Ok(Self {
            config,
            enricher,
            emitter,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn enricher(&self) -> &RecipeEnricher {
        &self.enricher
    }

    /// Runs the pipeline once.
    ///
    /// # Errors
    ///
    /// Any load, shape or write failure aborts the run; no output is
    /// written unless every step succeeded.
    pub fn run(&self) -> Result<GenerationReport> {
        info!(input = %self.config.input.display(), "processing recipes");
        let raws = load_raw_recipes(&self.config.input)?;
        debug!(count = raws.len(), "raw recipes loaded");

        let dataset = Dataset::build(&self.enricher, &raws);
        info!(total = dataset.total(), "recipes enriched");

        let text = self.emitter.render(&dataset.recipes)?;

        let output = if self.config.dry_run {
            info!("dry run, output not written");
            None
        } else {
            info!(output = %self.config.output.display(), "writing dataset module");
            write_atomic(&self.config.output, &text)?;
            Some(self.config.output.clone())
        };

        Ok(GenerationReport {
            total: dataset.total(),
            categories: dataset.categories,
            output,
            bytes: text.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    const CARROT_CAKE: &str = r#"[{"titulo":"Bolo de Cenoura","ingredientes":["cenoura","farinha"],"modo_preparo":["bata","asse","espere"],"informacao_nutricional":{"carboidratos":"30g"}}]"#;

    #[test]
    fn parses_carrot_cake() {
        let raws = parse_raw_recipes(CARROT_CAKE).unwrap();
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].title, "Bolo de Cenoura");
        assert_eq!(raws[0].nutrition.carbs.as_deref(), Some("30g"));
    }

    #[test]
    fn non_json_is_malformed_input() {
        assert!(matches!(
            parse_raw_recipes("not json"),
            Err(ReceitarioError::MalformedInput { .. })
        ));
    }

    #[test]
    fn object_instead_of_array_is_malformed_input() {
        assert!(matches!(
            parse_raw_recipes(r#"{"titulo": "x"}"#),
            Err(ReceitarioError::MalformedInput { .. })
        ));
    }

    #[test]
    fn bad_record_is_named_by_index_and_title() {
        let json = r#"[
            {"titulo":"Suco","ingredientes":[],"modo_preparo":[],"informacao_nutricional":{}},
            {"titulo":"Pão Torto","ingredientes":[],"informacao_nutricional":{}}
        ]"#;
        let err = parse_raw_recipes(json).unwrap_err();
        match err {
            ReceitarioError::MalformedRecipe { index, title, .. } => {
                assert_eq!(index, 2);
                assert_eq!(title.as_deref(), Some("Pão Torto"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dataset_ids_are_contiguous_and_counts_sum() {
        let raw = |title: &str| RawRecipe {
            title: title.into(),
            ingredients: vec![],
            instructions: vec![],
            nutrition: Default::default(),
        };
        let raws = vec![raw("Bolo de Fubá"), raw("Suco de Uva"), raw("Bolo de Milho"), raw("Wrap")];
        let enricher = RecipeEnricher::builtin().unwrap();
        let dataset = Dataset::build(&enricher, &raws);

        let ids: Vec<u32> = dataset.recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(dataset.categories[0].id, "all");
        assert_eq!(dataset.categories[0].count, 4);
        let real: usize = dataset.categories[1..].iter().map(|e| e.count).sum();
        assert_eq!(real, 4);
        assert_eq!(dataset.recipes[1].category, Category::Bebidas);
    }

    #[test]
    fn report_lists_every_real_category() {
        let report = GenerationReport {
            total: 2,
            categories: category_counts([Category::Bolos, Category::Bolos]),
            output: None,
            bytes: 0,
        };
        let text = report.to_string();
        assert!(text.starts_with("Total de receitas: 2\n"));
        assert!(text.contains("  bolos: 2 receitas\n"));
        assert!(text.contains("  sopas: 0 receitas\n"));
        assert!(!text.contains("all:"));
        assert_eq!(report.count("all"), Some(2));
        assert_eq!(report.count("nope"), None);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("recipes.ts");
        for expected in [0o644, 0o640] {
            std::fs::write(&output, "// old\n").unwrap();
            std::fs::set_permissions(&output, std::fs::Permissions::from_mode(expected)).unwrap();

            write_atomic(&output, "// new\n").unwrap();

            assert_eq!(mode(&output), expected);
            assert_eq!(std::fs::read_to_string(&output).unwrap(), "// new\n");
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_module_gets_default_create_mode() {
        let dir = tempfile::TempDir::new().unwrap();
        let plain = dir.path().join("plain.ts");
        let atomic = dir.path().join("data/recipes.ts");
        std::fs::write(&plain, "").unwrap();

        write_atomic(&atomic, "").unwrap();

        assert_eq!(mode(&atomic), mode(&plain));
    }

    #[test]
    fn invalid_utf8_input_is_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("raw.json");
        std::fs::write(&input, b"[{\"titulo\":\"Bolo \xff\"}]").unwrap();

        let err = load_raw_recipes(&input).unwrap_err();

        assert!(matches!(err, ReceitarioError::MalformedInput { .. }));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn config_builder() {
        let config = PipelineConfig::new()
            .with_input("in.json")
            .with_output("out/recipes.ts")
            .with_rules("rules.json")
            .with_dry_run(true);
        assert_eq!(config.input, PathBuf::from("in.json"));
        assert_eq!(config.output, PathBuf::from("out/recipes.ts"));
        assert_eq!(config.rules, Some(PathBuf::from("rules.json")));
        assert!(config.dry_run);
    }

    #[test]
    fn default_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.input, PathBuf::from("Receitas GlicoBem Json.txt"));
        assert_eq!(config.output, PathBuf::from("data/recipes.ts"));
        assert!(!config.dry_run);
    }
}
