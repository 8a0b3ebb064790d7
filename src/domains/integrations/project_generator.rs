//! ARC project and component scaffolding (simulated).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// Cardinality of a relation between models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsTo,
    HasAndBelongsToMany,
}

/// A relation between two generated models.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RelationSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<RelationKind>,
    /// Name of the related model.
    #[serde(default)]
    pub model: Option<String>,
}

/// A data model to generate alongside a microservice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ModelSpec {
    pub name: String,
    /// Model properties as key-value pairs (name: type).
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub relations: Vec<RelationSpec>,
}

/// Result of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorResult {
    pub success: bool,
    pub name: String,
    pub output_dir: String,
    pub files: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectGeneratorService;

impl ProjectGeneratorService {
    pub fn new() -> Self {
        Self
    }

    /// Scaffold a new microservice.
    pub async fn generate_microservice(
        &self,
        name: &str,
        features: &[String],
        models: &[ModelSpec],
        output_dir: &str,
    ) -> GeneratorResult {
        info!(
            "Generating microservice {} ({} features, {} models) into {}",
            name,
            features.len(),
            models.len(),
            output_dir
        );

        GeneratorResult {
            success: true,
            name: name.to_string(),
            output_dir: output_dir.to_string(),
            files: microservice_files(name, features, models),
            message: format!(
                "Successfully generated microservice '{}' with {} features and {} models",
                name,
                features.len(),
                models.len()
            ),
        }
    }

    /// Add a model to an existing project.
    pub async fn generate_model(
        &self,
        project_path: &str,
        name: &str,
        properties: &Map<String, Value>,
        relations: &[RelationSpec],
    ) -> GeneratorResult {
        info!("Generating model {} in {}", name, project_path);

        let file_stem = name.to_lowercase();
        GeneratorResult {
            success: true,
            name: name.to_string(),
            output_dir: project_path.to_string(),
            files: vec![
                format!("{}/src/models/{}.model.ts", project_path, file_stem),
                format!("{}/src/repositories/{}.repository.ts", project_path, file_stem),
                format!("{}/src/controllers/{}.controller.ts", project_path, file_stem),
            ],
            message: format!(
                "Successfully generated model '{}' with {} properties and {} relations",
                name,
                properties.len(),
                relations.len()
            ),
        }
    }

    /// Add a controller to an existing project.
    pub async fn generate_controller(
        &self,
        project_path: &str,
        name: &str,
        model_name: &str,
        operations: &[String],
    ) -> GeneratorResult {
        info!("Generating controller {} for {} in {}", name, model_name, project_path);

        GeneratorResult {
            success: true,
            name: name.to_string(),
            output_dir: project_path.to_string(),
            files: vec![format!(
                "{}/src/controllers/{}.controller.ts",
                project_path,
                name.to_lowercase()
            )],
            message: format!(
                "Successfully generated controller '{}' for model '{}' with {} operations",
                name,
                model_name,
                operations.len()
            ),
        }
    }
}

fn microservice_files(name: &str, features: &[String], models: &[ModelSpec]) -> Vec<String> {
    let base = format!("./generated/{}", name);
    let mut relative: Vec<String> = [
        "package.json",
        "tsconfig.json",
        "README.md",
        "src/index.ts",
        "src/application.ts",
        "src/datasources/db.datasource.ts",
        "src/controllers/ping.controller.ts",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let has = |feature: &str| features.iter().any(|f| f == feature);

    if has("authentication") {
        relative.extend(
            [
                "src/authentication-strategies/jwt.strategy.ts",
                "src/controllers/auth.controller.ts",
                "src/models/user.model.ts",
                "src/repositories/user.repository.ts",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
    }

    if has("notification") {
        relative.extend(
            [
                "src/services/notification.service.ts",
                "src/controllers/notification.controller.ts",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
    }

    for model in models {
        let stem = model.name.to_lowercase();
        relative.push(format!("src/models/{}.model.ts", stem));
        relative.push(format!("src/repositories/{}.repository.ts", stem));
        relative.push(format!("src/controllers/{}.controller.ts", stem));
    }

    relative
        .into_iter()
        .map(|file| format!("{}/{}", base, file))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_microservice_files_follow_features_and_models() {
        let models = vec![ModelSpec {
            name: "Order".into(),
            ..Default::default()
        }];
        let result = ProjectGeneratorService::new()
            .generate_microservice(
                "billing",
                &["authentication".to_string(), "caching".to_string()],
                &models,
                "./out",
            )
            .await;

        assert_eq!(result.files.len(), 7 + 4 + 3);
        assert!(
            result
                .files
                .contains(&"./generated/billing/src/models/order.model.ts".to_string())
        );
        assert_eq!(result.output_dir, "./out");
        assert!(result.message.contains("2 features and 1 models"));
    }

    #[tokio::test]
    async fn test_controller_file_name_is_lowercased() {
        let result = ProjectGeneratorService::new()
            .generate_controller("p", "OrderController", "Order", &[])
            .await;
        assert_eq!(result.files, vec!["p/src/controllers/ordercontroller.controller.ts"]);
    }
}
