//! Library Tests
//!
//! Tests for the library lifecycle against a shared type system.

use std::path::PathBuf;
use tabula::{
    destroy_library, initialize_library, DataType, Error, Library, ReductionEncoder, ReductionOp,
    ResourceConfig, Result, SharedTypeSystem, TypeSystem,
};
use tempfile::TempDir;

struct UnitsLibrary {
    config: ResourceConfig,
    alive: bool,
}

impl UnitsLibrary {
    fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            alive: false,
        }
    }
}

impl Library for UnitsLibrary {
    fn name(&self) -> &str {
        "units"
    }

    fn shared_library(&self) -> Option<PathBuf> {
        None
    }

    fn c_header(&self) -> &str {
        ""
    }

    fn registration_callback(&self) -> &str {
        "units_perform_registration"
    }

    fn initialize(&mut self, types: &mut TypeSystem) -> Result<()> {
        types.make_alias("seconds", &DataType::Float64.into(), true)?;
        let code = types.lookup(&"seconds".into())?.code();
        let id = ReductionEncoder::default()
            .encode(ReductionOp::Add, code)
            .ok_or_else(|| Error::unsupported("encode seconds"))?;
        types.add_type("duration", 8, code)?;
        types.register_reduction_op(&"duration".into(), ReductionOp::Add, id)?;
        self.alive = true;
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.alive = false;
        Ok(())
    }

    fn resource_config(&self) -> ResourceConfig {
        self.config
    }
}

#[test]
fn library_extends_shared_type_system() {
    let shared = SharedTypeSystem::default();
    let mut lib = UnitsLibrary::new(ResourceConfig::default());

    let config = shared
        .extend(|types| initialize_library(&mut lib, types))
        .unwrap();
    assert_eq!(config.max_mappers, 1);
    assert!(lib.alive);

    let seconds = shared.lookup_cloned(&"seconds".into()).unwrap();
    let duration = shared.lookup_cloned(&"duration".into()).unwrap();
    assert_eq!(
        seconds.reduction_op_id(ReductionOp::Add).unwrap(),
        duration.reduction_op_id(ReductionOp::Add).unwrap()
    );
    assert_eq!(seconds.num_reduction_ops(), 6);

    destroy_library(&mut lib).unwrap();
    assert!(!lib.alive);
}

#[test]
fn library_config_loaded_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("units.toml");
    std::fs::write(&path, "max_tasks = 64\nmax_reduction_ops = 2\n").unwrap();

    let config = ResourceConfig::from_file(&path).unwrap();
    let mut lib = UnitsLibrary::new(config);
    let mut types = TypeSystem::default();
    let applied = initialize_library(&mut lib, &mut types).unwrap();
    assert_eq!(applied.max_tasks, 64);
    assert_eq!(applied.max_reduction_ops, 2);
}

#[test]
fn invalid_config_leaves_type_system_alone() {
    let mut lib = UnitsLibrary::new(ResourceConfig {
        max_tasks: 0,
        ..ResourceConfig::default()
    });
    let mut types = TypeSystem::default();
    let before = types.len();
    assert!(matches!(
        initialize_library(&mut lib, &mut types).unwrap_err(),
        Error::Config { .. }
    ));
    assert_eq!(types.len(), before);
}
