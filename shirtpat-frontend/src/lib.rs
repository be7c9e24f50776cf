pub mod cli;
pub mod errors;
pub mod loader;

use std::path::Path;

use tracing::info;

use errors::FrontendError;
use shirtpat_config::AppConfig;

/// 启动 CLI 生成流程或返回错误。
pub fn run_generate(
    config: &AppConfig,
    measurement_path: Option<&Path>,
) -> Result<(), FrontendError> {
    info!("启动衬衫纸样生成流程");
    cli::run_generate(config, measurement_path)
}
