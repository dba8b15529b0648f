// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Template discovery and rendering.
//!
//! Any file whose name contains `{{` is a template. Its name is itself a
//! template for the output file name, and the output is written to the
//! directory the template lives in.

use crate::error::{ProvisionError, Result, TemplateError};
use crate::identifier::validate_file_name;
use crate::model::{Endpoint, Peering};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const TEMPLATE_MARKER: &str = "{{";

handlebars_helper!(endpoint_host: |value: str| {
	Endpoint::parse(value).map(|e| e.host).unwrap_or_default()
});

handlebars_helper!(endpoint_port: |value: str| {
	Endpoint::parse(value)
		.and_then(|e| e.port)
		.map(|port| port.to_string())
		.unwrap_or_default()
});

#[derive(Debug, Clone)]
struct TemplateEntry {
	source: PathBuf,
	dir: PathBuf,
	name_key: String,
	content_key: String,
}

/// Templates loaded once at start-up, in sorted path order.
pub struct TemplateSet {
	registry: Handlebars<'static>,
	entries: Vec<TemplateEntry>,
}

impl TemplateSet {
	pub fn load(root: impl AsRef<Path>) -> std::result::Result<Self, TemplateError> {
		let root = root.as_ref();
		let mut files = Vec::new();
		collect_files(root, &mut files)?;
		files.sort();

		let mut set = Self::empty();
		for path in files {
			let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
				warn!(path = %path.display(), "skipping template with non UTF-8 name");
				continue;
			};
			if !file_name.contains(TEMPLATE_MARKER) {
				continue;
			}
			let file_name = file_name.to_string();
			let content = fs::read_to_string(&path).map_err(|source| TemplateError::Io {
				path: path.clone(),
				source,
			})?;
			set.add(path, &file_name, &content)?;
		}

		debug!(root = %root.display(), templates = set.len(), "loaded templates");
		Ok(set)
	}

	fn empty() -> Self {
		let mut registry = Handlebars::new();
		registry.set_strict_mode(true);
		registry.register_escape_fn(no_escape);
		registry.register_helper("host", Box::new(endpoint_host));
		registry.register_helper("port", Box::new(endpoint_port));
		Self {
			registry,
			entries: Vec::new(),
		}
	}

	fn add(
		&mut self,
		source: PathBuf,
		file_name: &str,
		content: &str,
	) -> std::result::Result<(), TemplateError> {
		let index = self.entries.len();
		let name_key = format!("{index}/name");
		let content_key = format!("{index}/content");
		let parse_error = |e: handlebars::TemplateError| TemplateError::Parse {
			path: source.clone(),
			source: Box::new(e),
		};

		self
			.registry
			.register_template_string(&name_key, file_name)
			.map_err(parse_error)?;
		self
			.registry
			.register_template_string(&content_key, content)
			.map_err(parse_error)?;

		let dir = source
			.parent()
			.map(Path::to_path_buf)
			.unwrap_or_default();
		self.entries.push(TemplateEntry {
			source,
			dir,
			name_key,
			content_key,
		});
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn sources(&self) -> impl Iterator<Item = &Path> {
		self.entries.iter().map(|e| e.source.as_path())
	}

	/// Write every template rendered against `local` and collect every
	/// template rendered against `peer`.
	///
	/// Blocking. Files written for earlier templates stay on disk when a
	/// later template fails.
	pub fn render_all(&self, local: &Peering, peer: &Peering) -> Result<BTreeMap<String, String>> {
		let mut files = BTreeMap::new();

		for entry in &self.entries {
			let local_name = self.render(entry, &entry.name_key, local)?;
			validate_file_name(&local_name)?;
			self.write_rendered(entry, &entry.dir.join(&local_name), local)?;

			let peer_name = self.render(entry, &entry.name_key, peer)?;
			validate_file_name(&peer_name)?;
			let peer_content = self.render(entry, &entry.content_key, peer)?;
			files.insert(peer_name, peer_content);
		}

		Ok(files)
	}

	fn render(&self, entry: &TemplateEntry, key: &str, data: &Peering) -> Result<String> {
		self
			.registry
			.render(key, data)
			.map_err(|source| render_error(entry, source))
	}

	fn write_rendered(&self, entry: &TemplateEntry, path: &Path, data: &Peering) -> Result<()> {
		let file = File::create(path).map_err(|source| ProvisionError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let mut writer = BufWriter::new(file);

		let written = self
			.registry
			.render_to_write(&entry.content_key, data, &mut writer)
			.map_err(|source| render_error(entry, source))
			.and_then(|()| {
				writer.flush().map_err(|source| ProvisionError::Io {
					path: path.to_path_buf(),
					source,
				})
			});

		if let Err(e) = written {
			drop(writer);
			if let Err(remove) = fs::remove_file(path) {
				warn!(path = %path.display(), error = %remove, "failed to remove partial output");
			}
			return Err(e);
		}

		debug!(path = %path.display(), "wrote rendered template");
		Ok(())
	}
}

fn render_error(entry: &TemplateEntry, source: handlebars::RenderError) -> ProvisionError {
	ProvisionError::TemplateRender {
		template: entry.source.display().to_string(),
		source,
	}
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::result::Result<(), TemplateError> {
	let io_error = |source| TemplateError::Io {
		path: dir.to_path_buf(),
		source,
	};
	for entry in fs::read_dir(dir).map_err(io_error)? {
		let entry = entry.map_err(io_error)?;
		let path = entry.path();
		let file_type = entry.file_type().map_err(io_error)?;
		if file_type.is_dir() {
			collect_files(&path, files)?;
		} else if file_type.is_file() {
			files.push(path);
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::keys::WgKey;
	use crate::model::PointOfPresence;
	use tempfile::TempDir;

	const ALICE_PRIV: &str = "YWxpY2UtcHJpdmF0ZS1rZXktMDEyMzQ1Njc4OWFiY2Q=";

	fn peering() -> Peering {
		Peering {
			alice: PointOfPresence {
				name: "LG_NODE".to_string(),
				asn: 4242420000,
				endpoint: "lg.example.net:21234".to_string(),
				private_key: Some(WgKey::from_base64(ALICE_PRIV).unwrap()),
				..Default::default()
			},
			bob: PointOfPresence {
				name: "PEER".to_string(),
				asn: 4242421234,
				..Default::default()
			},
			..Default::default()
		}
	}

	#[test]
	fn discovers_templates_recursively_in_sorted_order() {
		let dir = TempDir::new().unwrap();
		fs::create_dir_all(dir.path().join("wireguard")).unwrap();
		fs::create_dir_all(dir.path().join("bird")).unwrap();
		fs::write(dir.path().join("wireguard/{{Bob.name}}.conf"), "wg").unwrap();
		fs::write(dir.path().join("bird/{{Bob.name}}.conf"), "bgp").unwrap();
		fs::write(dir.path().join("bird/README"), "not a template").unwrap();

		let set = TemplateSet::load(dir.path()).unwrap();
		let sources: Vec<_> = set.sources().map(Path::to_path_buf).collect();
		assert_eq!(
			sources,
			vec![
				dir.path().join("bird/{{Bob.name}}.conf"),
				dir.path().join("wireguard/{{Bob.name}}.conf"),
			]
		);
	}

	#[test]
	fn missing_directory_is_io_error() {
		let dir = TempDir::new().unwrap();
		let err = TemplateSet::load(dir.path().join("absent")).err().unwrap();
		assert!(matches!(err, TemplateError::Io { .. }));
	}

	#[test]
	fn unbalanced_template_is_parse_error() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("{{Bob.name}}.conf"), "{{#if Bob.name}}").unwrap();
		let err = TemplateSet::load(dir.path()).err().unwrap();
		assert!(matches!(err, TemplateError::Parse { .. }));
	}

	#[test]
	fn renders_without_html_escaping() {
		let dir = TempDir::new().unwrap();
		fs::write(
			dir.path().join("{{Bob.name}}.conf"),
			"key={{Alice.priv}} note={{Bob.note}}",
		)
		.unwrap();
		let set = TemplateSet::load(dir.path()).unwrap();

		let mut local = peering();
		local.bob.note = "<b>&</b>".to_string();
		let peer = local.swapped().masked();
		let files = set.render_all(&local, &peer).unwrap();

		let written = fs::read_to_string(dir.path().join("PEER.conf")).unwrap();
		assert_eq!(written, format!("key={ALICE_PRIV} note=<b>&</b>"));
		assert_eq!(files["LG_NODE.conf"], "key=<private key> note=");
	}

	#[test]
	fn endpoint_helpers_split_host_and_port() {
		let dir = TempDir::new().unwrap();
		fs::write(
			dir.path().join("{{Bob.name}}.conf"),
			"ListenPort = {{port Alice.wg}}\nHost = {{host Alice.wg}}\n",
		)
		.unwrap();
		let set = TemplateSet::load(dir.path()).unwrap();

		let local = peering();
		set.render_all(&local, &local.swapped().masked()).unwrap();
		let written = fs::read_to_string(dir.path().join("PEER.conf")).unwrap();
		assert_eq!(written, "ListenPort = 21234\nHost = lg.example.net\n");
	}

	#[test]
	fn unsafe_rendered_name_is_rejected() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("{{Bob.note}}"), "x").unwrap();
		let set = TemplateSet::load(dir.path()).unwrap();

		let mut local = peering();
		local.bob.note = "..".to_string();
		let err = set.render_all(&local, &local.swapped()).unwrap_err();
		assert!(matches!(err, ProvisionError::InvalidIdentifier(_)));
	}
}
