/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
use std::fmt::Display;

use serde::Serialize;

use crate::cmd::args::OutputFormat;

/// Render a report in the requested format. Text uses the report's Display
/// impl; JSON and YAML come from its Serialize impl.
pub fn render<T>(report: &T, format: OutputFormat) -> eyre::Result<String>
where
    T: Serialize + Display,
{
    let rendered = match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Yaml => serde_yaml::to_string(report)?,
    };
    Ok(rendered.trim_end().to_string())
}

/// Write a `key: value` line, or `key: -` when the value is absent.
pub(crate) fn field<V: Display>(
    f: &mut std::fmt::Formatter<'_>,
    key: &str,
    value: Option<V>,
) -> std::fmt::Result {
    match value {
        Some(value) => writeln!(f, "{key:<12}{value}"),
        None => writeln!(f, "{key:<12}-"),
    }
}
