// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use mirrorcheck::application::use_cases::verify_migration_use_case::VerifyMigrationUseCase;
use mirrorcheck::config::settings::Settings;
use mirrorcheck::engines::reqwest_engine::ReqwestEngine;
use mirrorcheck::infrastructure::observability::metrics::init_metrics;
use mirrorcheck::utils::telemetry;
use std::sync::Arc;
use tracing::info;

/// 主函数
///
/// 加载配置，依次执行爬取、存在性校验和深度校验，并把汇总结果输出到标准输出
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Load configuration
    let settings = Settings::new()?;
    settings.validate()?;
    info!("Configuration loaded");

    // 3. Initialize metrics
    let metrics = init_metrics()?;

    // 4. Build the pipeline
    let engine = Arc::new(ReqwestEngine::from_settings(&settings.http)?);
    let use_case = VerifyMigrationUseCase::from_settings(&settings, engine)?;

    // 5. Run and report
    let report = use_case.execute().await?;

    println!("{} files found on {}", report.file_links.len(), report.hosts.source());
    println!(
        "{} files not found on new host",
        report.existence.not_found_count()
    );
    for link in report.mismatches() {
        println!("Checksum mismatch: {}", link.file_name());
    }

    if settings.metrics.render_on_exit {
        print!("{}", metrics.render());
    }

    Ok(())
}
