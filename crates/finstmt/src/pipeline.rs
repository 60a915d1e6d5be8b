//! Statement pipeline: ingested filings in, statements out.

use finstmt_core::{
    Diagnostics, EngineConfig, FilingBundle, FilingStatement, Result, StatementError, StatementKind,
};
use finstmt_facts::Filing;
use finstmt_periods::PeriodSelector;
use finstmt_statements::{StatementBuilder, StatementTypeResolver};
use finstmt_stitch::{StatementStitcher, StitchedStatement};
use tracing::{debug, instrument};

/// A single-filing statement with how it was found.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltStatement {
    /// The statement.
    pub statement: FilingStatement,
    /// Presentation role it was built from.
    pub role: String,
    /// Resolver confidence for that role.
    pub confidence: f64,
    /// Duplicate-fact conflicts met while building.
    pub diagnostics: Diagnostics,
}

/// Owns the engine configuration and the ingested filings.
///
/// # Example
///
/// ```rust,ignore
/// use finstmt::{EngineConfig, StatementKind, StatementPipeline};
///
/// let mut pipeline = StatementPipeline::new(EngineConfig::default())?;
/// pipeline.add_json(&filing_2023)?;
/// pipeline.add_json(&filing_2024)?;
///
/// let balance = pipeline.stitched(StatementKind::BalanceSheet)?;
/// ```
pub struct StatementPipeline {
    config: EngineConfig,
    resolver: StatementTypeResolver,
    selector: PeriodSelector,
    builder: StatementBuilder,
    stitcher: StatementStitcher,
    filings: Vec<Filing>,
}

impl std::fmt::Debug for StatementPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementPipeline")
            .field("config", &self.config)
            .field(
                "filings",
                &self.filings.iter().map(Filing::accession).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl StatementPipeline {
    /// Creates a pipeline with the default role patterns.
    ///
    /// # Errors
    ///
    /// [`StatementError::InvalidConfig`] when the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let resolver = StatementTypeResolver::new()?.with_config(config.resolver);
        let selector = PeriodSelector::new(config.selection, &config.policy);
        Ok(Self {
            resolver,
            selector,
            builder: StatementBuilder::new(config.builder),
            stitcher: StatementStitcher::new(config.stitch).with_selector(selector),
            filings: Vec::new(),
            config,
        })
    }

    /// Replaces the statement type resolver, keeping the configured threshold.
    #[must_use]
    pub fn with_resolver(mut self, resolver: StatementTypeResolver) -> Self {
        self.resolver = resolver.with_config(self.config.resolver);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Adds an ingested filing.
    pub fn add_filing(&mut self, filing: Filing) {
        debug!(
            filing = %filing.accession(),
            facts = filing.facts().len(),
            issues = filing.diagnostics().len(),
            "Adding filing"
        );
        self.filings.push(filing);
    }

    /// Ingests and adds one filing's records.
    pub fn add_bundle(&mut self, bundle: FilingBundle) {
        let filing = Filing::from_bundle(bundle, &self.config.policy);
        self.add_filing(filing);
    }

    /// Parses and adds one filing from JSON text.
    ///
    /// # Errors
    ///
    /// [`StatementError::Parse`] when the text is not a filing bundle.
    pub fn add_json(&mut self, json: &str) -> Result<()> {
        self.add_bundle(FilingBundle::from_json(json)?);
        Ok(())
    }

    /// Returns the filings in the order added.
    #[must_use]
    pub fn filings(&self) -> &[Filing] {
        &self.filings
    }

    /// Looks up a filing by accession number.
    #[must_use]
    pub fn filing(&self, accession: &str) -> Option<&Filing> {
        self.filings.iter().find(|f| f.accession() == accession)
    }

    /// Returns the number of filings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filings.len()
    }

    /// Returns true when no filing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }

    /// Builds one filing's statement of a kind.
    ///
    /// `None` when the filing is unknown or none of its roles resolves to `kind`
    /// with enough confidence.
    #[must_use]
    pub fn filing_statement(&self, accession: &str, kind: StatementKind) -> Option<BuiltStatement> {
        self.build(self.filing(accession)?, kind)
    }

    /// Builds the statement of a kind for every filing that presents one.
    #[must_use]
    pub fn filing_statements(&self, kind: StatementKind) -> Vec<BuiltStatement> {
        self.filings.iter().filter_map(|f| self.build(f, kind)).collect()
    }

    /// Stitches every filing's statement of a kind into one.
    ///
    /// The returned diagnostics hold the filings' ingestion issues, the build
    /// conflicts and the structural drift, in that order.
    ///
    /// # Errors
    ///
    /// [`StatementError::NoStatements`] when no filing presents `kind`.
    #[instrument(skip_all, fields(kind = %kind, filings = self.filings.len()))]
    pub fn stitched(&self, kind: StatementKind) -> Result<StitchedStatement> {
        let built = self.filing_statements(kind);
        if built.is_empty() {
            return Err(StatementError::NoStatements);
        }

        let mut diagnostics = Diagnostics::new();
        for filing in &self.filings {
            diagnostics.extend(filing.diagnostics().clone());
        }
        let mut statements = Vec::with_capacity(built.len());
        for b in built {
            diagnostics.extend(b.diagnostics);
            statements.push(b.statement);
        }

        let mut stitched = self.stitcher.stitch(&statements)?;
        diagnostics.extend(stitched.diagnostics);
        stitched.diagnostics = diagnostics;
        Ok(stitched)
    }

    /// Stitches a kind and exports it as a DataFrame.
    ///
    /// # Errors
    ///
    /// As [`stitched`](Self::stitched), plus [`StatementError::Export`].
    #[cfg(feature = "frame")]
    pub fn stitched_frame(&self, kind: StatementKind) -> Result<polars::prelude::DataFrame> {
        finstmt_frame::statement_to_frame(&self.stitched(kind)?.statement)
    }

    fn build(&self, filing: &Filing, kind: StatementKind) -> Option<BuiltStatement> {
        let roles = filing.presentations().iter().map(|p| p.role.as_str());
        let Some((role, confidence)) = self.resolver.select_role(roles, kind) else {
            debug!(filing = %filing.accession(), kind = %kind, "No role for statement kind");
            return None;
        };
        let presentation = filing.presentation(role)?;

        let periods = self.selector.select(
            &filing.contexts().periods(),
            filing.fiscal(),
            kind,
            self.config.selection.max_periods,
        );

        let mut diagnostics = Diagnostics::new();
        let statement = self
            .builder
            .build(filing, presentation, kind, &periods, &mut diagnostics);
        Some(BuiltStatement {
            statement,
            role: role.to_string(),
            confidence,
            diagnostics,
        })
    }
}
