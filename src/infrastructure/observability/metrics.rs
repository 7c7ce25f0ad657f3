// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const CRAWL_PAGES_VISITED: &str = "crawl_pages_visited_total";
pub const CRAWL_FILES_DISCOVERED: &str = "crawl_files_discovered_total";
pub const EXISTENCE_PROBES: &str = "existence_probes_total";
pub const EXISTENCE_NOT_FOUND: &str = "existence_not_found_total";
pub const DEEP_CHECKS: &str = "deep_checks_total";
pub const DEEP_CHECK_MISMATCHES: &str = "deep_check_mismatches_total";

/// 初始化指标系统
///
/// 安装全局Prometheus记录器并登记各计数器的说明。返回的句柄可在运行结束时
/// 以Prometheus文本格式导出快照。
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    describe_counter!(CRAWL_PAGES_VISITED, "Total number of listing pages fetched");
    describe_counter!(
        CRAWL_FILES_DISCOVERED,
        "Total number of unique files of interest discovered"
    );
    describe_counter!(EXISTENCE_PROBES, "Total number of existence probes sent");
    describe_counter!(
        EXISTENCE_NOT_FOUND,
        "Total number of files not found on the target host"
    );
    describe_counter!(DEEP_CHECKS, "Total number of checksum comparisons");
    describe_counter!(
        DEEP_CHECK_MISMATCHES,
        "Total number of checksum comparisons that did not match"
    );
}
