//! Test fixtures - reusable content constants for tests.

/// A small nutrition model: two namespaces, nested modules, a commented-out entry
pub const NUTRITION_SPEC: &str = r#"
components:
    vivarium_public_health:
        population:
            - BasePopulation()
            - Mortality()
        results:
            - DiseaseObserver("anemia")
    vivarium_gates_nutrition:
        components:
            # - Hemoglobin()
            - MaternalInterventions()

configuration:
    input_data:
        input_draw_number: 0
        artifact_path: /mnt/artifacts/ethiopia.hdf
    population:
        population_size: 20_000
    time:
        start:
            year: 2025
            month: 1
            day: 1
        step_size: 7
    stratification:
        default:
            - age_group
"#;

/// Catalog describing every component `NUTRITION_SPEC` references
pub const NUTRITION_CATALOG: &str = r#"
vivarium_public_health.population:
    BasePopulation:
        defaults:
            population:
                include_sex: Female
    Mortality:
        defaults:
            mortality:
                data_sources:
                    life_expectancy: population.theoretical_minimum_risk_life_expectancy
vivarium_public_health.results:
    DiseaseObserver:
        args: 1
        defaults:
            stratification:
                "{arg0}":
                    exclude: []
                    include: []
vivarium_gates_nutrition.components:
    Hemoglobin:
    MaternalInterventions:
        name: maternal_interventions
        defaults:
            intervention:
                scenario: baseline
"#;

/// Scenario override file
pub const MMS_SCENARIO: &str = r#"
intervention:
    scenario: mms
population:
    population_size: 10_000
"#;

/// Branch file: 2 scenarios x 2 draws x 3 seeds
pub const BRANCHES: &str = r#"
input_draw_count: 2
random_seed_count: 3
branches:
    - intervention:
        scenario: [baseline, mms]
"#;
