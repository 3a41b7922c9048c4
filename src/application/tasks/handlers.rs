//! Task handlers
//!
//! One function per registered task. Each reads what it needs from the
//! context and reports failures as [`WrtError`]; the orchestrator adds the
//! task name.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::ports::{DeviceBridge, FileSystem};
use crate::domain::value_objects::{DeviceCommand, DeviceCommandKind};
use crate::error::{WrtError, WrtResult};

use super::context::{BuildContext, ProducedArtifact};

type Ctx<FS, B> = BuildContext<FS, B>;

pub(super) fn clean<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let build_dir = ctx.config.build_dir();
    ctx.fs.remove_dir_all(&build_dir)?;
    info!(dir = %build_dir.display(), "cleaned build output");
    Ok(())
}

/// Concatenate and minify each configured bundle into the build dir
pub(super) fn transform_assets<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let build_dir = ctx.config.build_dir();

    for bundle in &ctx.config.bundles {
        let mut sources = Vec::with_capacity(bundle.inputs.len());
        for input in &bundle.inputs {
            let path = ctx.config.resolve(input);
            let raw = ctx.fs.read(&path)?;
            let text = String::from_utf8(raw).map_err(|_| WrtError::Minify {
                output: bundle.output.clone(),
                message: format!("{} is not UTF-8", path.display()),
            })?;
            sources.push(text);
        }

        let minified = ctx.minifier.minify(&bundle.output, &sources)?;
        let output = build_dir.join(&bundle.output);
        ctx.fs.write(&output, minified.as_bytes())?;

        debug!(
            minifier = ctx.minifier.name(),
            inputs = bundle.inputs.len(),
            output = %output.display(),
            "wrote bundle"
        );
        ctx.artifacts.push(ProducedArtifact {
            kind: "bundle".to_string(),
            path: output,
            files: None,
            hash: None,
        });
    }

    info!(bundles = ctx.config.bundles.len(), "transformed assets");
    Ok(())
}

/// Copy common files into the build dir through the content transformer
pub(super) fn copy_common<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let build_dir = ctx.config.build_dir();
    let mut copied = 0usize;
    let mut rewritten = 0usize;

    for mapping in &ctx.config.copies {
        for pattern in &mapping.patterns {
            let matches = ctx.fs.glob(&ctx.config.root, pattern)?;
            if matches.is_empty() {
                warn!(%pattern, "copy pattern matched nothing");
            }

            for rel in matches {
                let raw = ctx.fs.read(&ctx.config.resolve(&rel))?;
                let content = ctx.transformer.transform(&rel, &raw);
                if content.as_ref() != raw.as_slice() {
                    rewritten += 1;
                }

                let dest = build_dir.join(without_cur_dir(&mapping.dest.join(&rel)));
                ctx.fs.write(&dest, &content)?;
                copied += 1;
            }
        }
    }

    info!(copied, rewritten, "copied common files");
    Ok(())
}

pub(super) fn package_wgt<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    package(ctx, "wgt")
}

pub(super) fn package_crx<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    package(ctx, "crx")
}

fn package<FS, B>(ctx: &mut Ctx<FS, B>, format: &str) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let spec = ctx.config.package_spec(format)?;
    let built_root = ctx
        .config
        .package_source(format)
        .unwrap_or_else(|| ctx.config.build_dir());

    // Resolve the archive name before assembling so a missing identity
    // does not leave a half-finished package behind.
    let identity = if spec.is_archived() {
        Some(ctx.config.project_identity()?)
    } else {
        None
    };

    let assembled = ctx.packager.assemble(&spec, &built_root)?;
    ctx.artifacts.push(ProducedArtifact {
        kind: format.to_string(),
        path: assembled.install_root.clone(),
        files: Some(assembled.files.len()),
        hash: None,
    });

    if let Some((name, version)) = identity {
        let archived = ctx.packager.archive(
            ctx.archiver.as_ref(),
            &spec,
            &ctx.config.build_dir(),
            &name,
            &version,
        )?;
        if let Some(archived) = archived {
            ctx.artifacts.push(ProducedArtifact {
                kind: format!("{} archive", format),
                path: archived.path,
                files: None,
                hash: Some(archived.hash),
            });
        }
    }
    Ok(())
}

pub(super) fn device_prepare<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let command = DeviceCommand::Prepare {
        helper_script: ctx.config.device.helper_script.clone(),
        remote_dir: ctx.config.device.remote_dir.clone(),
    };
    ctx.session.execute(&command)?;
    Ok(())
}

pub(super) fn device_push<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let command = DeviceCommand::Push {
        dir: ctx.config.build_dir(),
        pattern: ctx.config.device.artifact_pattern.clone(),
        remote_dir: ctx.config.device.remote_dir.clone(),
    };
    ctx.session.execute(&command)?;
    Ok(())
}

pub(super) fn device_stop<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    app_command(ctx, DeviceCommandKind::Stop)
}

pub(super) fn device_uninstall<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    app_command(ctx, DeviceCommandKind::Uninstall)
}

pub(super) fn device_install<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let command = DeviceCommand::Install {
        helper: ctx.config.device.remote_helper(),
    };
    ctx.session.execute(&command)?;
    Ok(())
}

pub(super) fn device_debug<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    app_command(ctx, DeviceCommandKind::Debug)
}

/// Stop then start an application installed by an earlier run
pub(super) fn device_restart<FS, B>(ctx: &mut Ctx<FS, B>) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    ctx.session.attach_installed();
    app_command(ctx, DeviceCommandKind::Stop)?;
    app_command(ctx, DeviceCommandKind::Start)
}

/// Run a command that targets the installed application by id
fn app_command<FS, B>(ctx: &mut Ctx<FS, B>, kind: DeviceCommandKind) -> WrtResult<()>
where
    FS: FileSystem + Clone,
    B: DeviceBridge,
{
    let helper = ctx.config.device.remote_helper();
    let app_id = ctx.config.app_id()?.to_string();

    let command = match kind {
        DeviceCommandKind::Stop => DeviceCommand::Stop { helper, app_id },
        DeviceCommandKind::Uninstall => DeviceCommand::Uninstall { helper, app_id },
        DeviceCommandKind::Start => DeviceCommand::Start { helper, app_id },
        DeviceCommandKind::Debug => DeviceCommand::Debug {
            helper,
            app_id,
            local_port: ctx.config.device.local_port,
        },
        other => {
            return Err(WrtError::InvalidTransition {
                command: other,
                state: ctx.session.state(),
            })
        }
    };
    ctx.session.execute(&command)?;
    Ok(())
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
