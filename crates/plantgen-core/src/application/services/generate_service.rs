//! Generate Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Collect the package path and service name through a [`Prompter`]
//! 2. Validate them and resolve the destination directory
//! 3. Copy the template tree
//! 4. Apply the ordered substitution plan
//!
//! Every phase change is logged as a [`GenerationState`] transition; any
//! error moves the run to `Aborted` and is returned unchanged.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Prompter},
        services::{
            path_resolver::{is_within, resolve_destination},
            substitution_engine::{SubstitutionEngine, SubstitutionReport},
            tree_replicator::{CopyReport, TreeReplicator},
        },
    },
    domain::{
        DomainValidator as validator, GenerationState, PackagePath, PlanHazard, ServiceName,
        SubstitutionPlan, TemplateTokens, default_service_name, validate_service_name,
    },
    error::{PlantgenError, PlantgenResult},
};

/// Package path offered when the user has not configured one.
pub const DEFAULT_PACKAGE: &str = "github.com/theplant/mynewpkg";

/// Where and what to generate. Passed in by the caller; the service never
/// discovers the workspace on its own.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub workspace_root: PathBuf,
    pub template_root: PathBuf,
    pub tokens: TemplateTokens,
    pub rename_paths: bool,
    pub default_package: String,
}

impl GenerateSettings {
    /// Settings for the canonical template, which lives in the workspace at
    /// its own qualified path.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        let workspace_root = workspace_root.into();
        let tokens = TemplateTokens::default();
        let template_root = template_root_for(&workspace_root, &tokens);
        Self {
            workspace_root,
            template_root,
            tokens,
            rename_paths: false,
            default_package: DEFAULT_PACKAGE.to_owned(),
        }
    }

    /// Replace the tokens; the template root follows them.
    pub fn with_tokens(mut self, tokens: TemplateTokens) -> Self {
        self.template_root = template_root_for(&self.workspace_root, &tokens);
        self.tokens = tokens;
        self
    }

    pub fn with_template_root(mut self, template_root: impl Into<PathBuf>) -> Self {
        self.template_root = template_root.into();
        self
    }

    pub fn with_rename_paths(mut self, rename_paths: bool) -> Self {
        self.rename_paths = rename_paths;
        self
    }

    pub fn with_default_package(mut self, package: impl Into<String>) -> Self {
        self.default_package = package.into();
        self
    }
}

fn template_root_for(workspace_root: &Path, tokens: &TemplateTokens) -> PathBuf {
    tokens
        .qualified_path()
        .split('/')
        .fold(workspace_root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Validated user input for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub package: PackagePath,
    pub service: ServiceName,
}

impl GenerationRequest {
    pub fn new(package: PackagePath, service: ServiceName) -> Self {
        Self { package, service }
    }

    /// Parse raw strings, e.g. from command-line flags.
    pub fn parse(package: &str, service: &str) -> PlantgenResult<Self> {
        Ok(Self {
            package: PackagePath::parse(package)?,
            service: ServiceName::parse(service)?,
        })
    }
}

/// Everything a run would do, computed without writing.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    pub template_root: PathBuf,
    pub destination: PathBuf,
    pub substitutions: SubstitutionPlan,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub run_id: Uuid,
    pub package: PackagePath,
    pub service: ServiceName,
    pub destination: PathBuf,
    pub copy: CopyReport,
    pub substitution: SubstitutionReport,
    pub state: GenerationState,
}

/// Tracks the state machine of one run.
struct RunTracker {
    id: Uuid,
    state: GenerationState,
}

impl RunTracker {
    fn start(state: GenerationState) -> Self {
        let id = Uuid::new_v4();
        info!(run_id = %id, state = %state, "Generation run started");
        Self { id, state }
    }

    fn advance(&mut self, next: GenerationState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        info!(run_id = %self.id, from = %self.state, to = %next, "State transition");
        self.state = next;
    }

    fn abort(&mut self, error: &PlantgenError) {
        warn!(run_id = %self.id, state = %self.state, error = %error, "Generation aborted");
        self.state = GenerationState::Aborted;
    }
}

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    settings: GenerateSettings,
}

impl GenerateService {
    /// Create a new generate service.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use plantgen_core::application::{GenerateService, GenerateSettings};
    ///
    /// let service = GenerateService::new(
    ///     filesystem, // impl Filesystem
    ///     GenerateSettings::new("/home/me/go/src"),
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, settings: GenerateSettings) -> Self {
        Self {
            filesystem,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerateSettings {
        &self.settings
    }

    /// Collect inputs then generate.
    pub fn run(&self, prompter: &dyn Prompter) -> PlantgenResult<GenerationOutcome> {
        let request = self.collect_inputs(prompter)?;
        self.generate(&request)
    }

    /// Ask for the package path and the service name.
    ///
    /// The package prompt rejects paths that already exist under the
    /// workspace, so the user gets feedback before anything is copied.
    #[instrument(skip_all)]
    pub fn collect_inputs(&self, prompter: &dyn Prompter) -> PlantgenResult<GenerationRequest> {
        let fs = self.filesystem.as_ref();
        let root = self.settings.workspace_root.as_path();

        let package_input = prompter.ask(
            "Generate go package",
            &self.settings.default_package,
            &|input: &str| -> PlantgenResult<()> {
                let package = PackagePath::parse(input)?;
                resolve_destination(fs, root, &package).map(|_| ())
            },
        )?;
        let package = PackagePath::parse(&package_input)?;

        let service_input = prompter.ask(
            "Service Name",
            &default_service_name(package.package_name()),
            &|input: &str| -> PlantgenResult<()> { Ok(validate_service_name(input)?) },
        )?;
        let service = ServiceName::parse(&service_input)?;

        info!(package = %package, service = %service, "Inputs collected");
        Ok(GenerationRequest::new(package, service))
    }

    /// Validate and resolve without writing anything.
    pub fn plan(&self, request: &GenerationRequest) -> PlantgenResult<GenerationPlan> {
        self.validate(request)?;
        self.resolve(request)
    }

    /// Run the pipeline for already-collected inputs.
    #[instrument(
        skip_all,
        fields(package = %request.package, service = %request.service)
    )]
    pub fn generate(&self, request: &GenerationRequest) -> PlantgenResult<GenerationOutcome> {
        let mut run = RunTracker::start(GenerationState::CollectingInputs);
        match self.execute(&mut run, request) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                run.abort(&e);
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn execute(
        &self,
        run: &mut RunTracker,
        request: &GenerationRequest,
    ) -> PlantgenResult<GenerationOutcome> {
        run.advance(GenerationState::Validating);
        self.validate(request)?;

        run.advance(GenerationState::Resolving);
        let plan = self.resolve(request)?;

        run.advance(GenerationState::Copying);
        let replicator = TreeReplicator::new(self.filesystem.as_ref());
        let copied = replicator.copy_tree(&plan.template_root, &plan.destination)?;

        run.advance(GenerationState::Substituting);
        let engine = SubstitutionEngine::new(self.filesystem.as_ref());
        let mut substitution = engine.apply_plan(&plan.destination, &plan.substitutions)?;
        if self.settings.rename_paths {
            substitution.paths_renamed =
                engine.rename_paths(&plan.destination, &plan.substitutions)?;
        }
        replicator.apply_modes(
            &plan.destination,
            &copied,
            self.settings.rename_paths.then_some(&plan.substitutions),
        )?;

        run.advance(GenerationState::Done);
        info!(
            run_id = %run.id,
            destination = %plan.destination.display(),
            "Generation completed successfully"
        );

        Ok(GenerationOutcome {
            run_id: run.id,
            package: request.package.clone(),
            service: request.service.clone(),
            destination: plan.destination,
            copy: copied.report,
            substitution,
            state: run.state,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> PlantgenResult<()> {
        validator::validate_package_path(&request.package)?;
        validator::validate_service_name(&request.service)?;
        validator::validate_tokens(&self.settings.tokens)?;
        Ok(())
    }

    fn resolve(&self, request: &GenerationRequest) -> PlantgenResult<GenerationPlan> {
        let destination = resolve_destination(
            self.filesystem.as_ref(),
            &self.settings.workspace_root,
            &request.package,
        )?;

        if is_within(&destination, &self.settings.template_root)? {
            return Err(ApplicationError::DestinationInsideTemplate { path: destination }.into());
        }

        let substitutions =
            SubstitutionPlan::for_generation(&self.settings.tokens, &request.package, &request.service)?;
        for hazard in substitutions.hazards() {
            if let PlanHazard::ValueRewritten { rule, by } = hazard {
                let rules = substitutions.rules();
                warn!(
                    value = rules[rule].to(),
                    token = rules[by].from(),
                    "Inserted value contains a later token and will be rewritten"
                );
            }
        }

        Ok(GenerationPlan {
            template_root: self.settings.template_root.clone(),
            destination,
            substitutions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{InputValidator, MockFilesystem};
    use crate::domain::{DomainError, TreeEntry};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays answers, recording the defaults it was offered.
    struct Replay {
        answers: RefCell<VecDeque<&'static str>>,
        defaults: RefCell<Vec<String>>,
    }

    impl Replay {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                defaults: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for Replay {
        fn ask(
            &self,
            _label: &str,
            default: &str,
            validate: InputValidator<'_>,
        ) -> PlantgenResult<String> {
            self.defaults.borrow_mut().push(default.to_owned());
            let answer = self
                .answers
                .borrow_mut()
                .pop_front()
                .ok_or(ApplicationError::Cancelled)?;
            let value = if answer.is_empty() { default } else { answer };
            validate(value)?;
            Ok(value.to_owned())
        }
    }

    fn settings() -> GenerateSettings {
        GenerateSettings::new("/ws/src")
    }

    #[test]
    fn template_root_follows_qualified_path() {
        let settings = settings();
        assert_eq!(
            settings.template_root,
            Path::new("/ws/src")
                .join("github.com")
                .join("theplant")
                .join("plantpkg")
                .join("template")
        );
    }

    #[test]
    fn collects_inputs_with_derived_default() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        let service = GenerateService::new(Box::new(fs), settings());

        let prompter = Replay::new(&["github.com/acme/widget", ""]);
        let request = service.collect_inputs(&prompter).unwrap();

        assert_eq!(request.package.as_str(), "github.com/acme/widget");
        assert_eq!(request.service.as_str(), "Widget");
        assert_eq!(
            *prompter.defaults.borrow(),
            vec![DEFAULT_PACKAGE.to_owned(), "Widget".to_owned()]
        );
    }

    #[test]
    fn cancellation_aborts_input_collection() {
        let fs = MockFilesystem::new();
        let service = GenerateService::new(Box::new(fs), settings());

        let err = service.collect_inputs(&Replay::new(&[])).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn package_prompt_rejects_existing_destination() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let service = GenerateService::new(Box::new(fs), settings());

        let err = service
            .collect_inputs(&Replay::new(&["github.com/acme/widget"]))
            .unwrap_err();
        assert!(matches!(
            err,
            PlantgenError::Application(ApplicationError::DestinationExists { .. })
        ));
    }

    #[test]
    fn lower_case_service_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        let service = GenerateService::new(Box::new(fs), settings());

        let err = service
            .collect_inputs(&Replay::new(&["github.com/acme/widget", "widget"]))
            .unwrap_err();
        assert!(matches!(
            err,
            PlantgenError::Domain(DomainError::ServiceNameCasing { .. })
        ));
    }

    #[test]
    fn destination_inside_template_is_refused() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_walk().never();
        let service = GenerateService::new(Box::new(fs), settings());

        let request =
            GenerationRequest::parse("github.com/theplant/plantpkg/template/inner", "Inner")
                .unwrap();
        let err = service.generate(&request).unwrap_err();
        assert!(matches!(
            err,
            PlantgenError::Application(ApplicationError::DestinationInsideTemplate { .. })
        ));
    }

    #[test]
    fn relative_template_root_still_guards_the_destination() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_walk().never();
        let service = GenerateService::new(
            Box::new(fs),
            GenerateSettings::new(".").with_template_root("tpl"),
        );

        let request = GenerationRequest::parse("tpl/inner", "Inner").unwrap();
        let err = service.generate(&request).unwrap_err();
        assert!(matches!(
            err,
            PlantgenError::Application(ApplicationError::DestinationInsideTemplate { .. })
        ));
    }

    #[test]
    fn plan_does_not_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        let service = GenerateService::new(Box::new(fs), settings());

        let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
        let plan = service.plan(&request).unwrap();
        assert_eq!(plan.destination, Path::new("/ws/src").join("github.com/acme/widget"));
        assert_eq!(plan.substitutions.len(), 3);
    }

    #[test]
    fn substitution_failure_is_surfaced() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(true);
        fs.expect_walk()
            .returning(|_| Ok(vec![TreeEntry::file("greeting.txt", None)]));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_read_file()
            .returning(|_| Ok(b"Hello, template!".to_vec()));
        fs.expect_set_mode().returning(|_, _| Ok(()));

        // First write is the copy, second is the rewrite.
        let mut writes = 0;
        fs.expect_write_file().returning(move |path, _| {
            writes += 1;
            if writes == 1 {
                Ok(())
            } else {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            }
        });

        let service = GenerateService::new(Box::new(fs), settings());
        let request = GenerationRequest::parse("github.com/acme/widget", "Widget").unwrap();
        let err = service.generate(&request).unwrap_err();
        assert!(matches!(
            err,
            PlantgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
