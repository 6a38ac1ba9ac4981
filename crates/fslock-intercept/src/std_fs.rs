//! A reference `fs` binding over `std::fs`.
//!
//! Argument layout follows the descriptor table: path arguments first, the
//! continuation at the operation's continuation position. Every primitive
//! honours all three calling conventions.

use std::fs::{self, DirBuilder, OpenOptions, Permissions};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::sync::Arc;

use crate::binding::BindingTable;
use crate::delivery::Continuation;
use crate::descriptor::FsOperation;
use crate::error::{HostError, HostResult};
use crate::host::{HostArgs, HostPrimitive, HostValue};

type Operation = fn(&HostArgs) -> HostResult<HostValue>;

/// Build a binding table implementing every guarded operation.
#[must_use]
pub fn std_fs_binding() -> BindingTable {
    let mut table = BindingTable::new();
    for operation in FsOperation::ALL {
        table.insert(operation.name(), primitive(operation, implementation(operation)));
    }
    table
}

fn implementation(operation: FsOperation) -> Operation {
    match operation {
        FsOperation::Open => open,
        FsOperation::Rename => rename,
        FsOperation::Rmdir => rmdir,
        FsOperation::Mkdir => mkdir,
        FsOperation::Readdir => readdir,
        FsOperation::Symlink => symlink,
        FsOperation::Link => link,
        FsOperation::Unlink => unlink,
        FsOperation::Chmod => chmod,
        FsOperation::Chown => chown,
        FsOperation::Readlink => readlink,
    }
}

fn primitive(operation: FsOperation, run: Operation) -> HostPrimitive {
    Arc::new(move |mut args: HostArgs| {
        let continuation = Continuation::take(&mut args, operation.descriptor());
        continuation.complete(run(&args))
    })
}

fn path(args: &HostArgs, index: usize, operation: &str) -> HostResult<String> {
    args.get(index)
        .and_then(HostValue::as_path)
        .ok_or_else(|| HostError::invalid_argument(operation, "path must be a string or bytes"))
}

fn mode(args: &HostArgs, index: usize, operation: &str) -> HostResult<Option<u32>> {
    match args.get(index) {
        None | Some(HostValue::Undefined) => Ok(None),
        Some(HostValue::Int(value)) => u32::try_from(*value)
            .map(Some)
            .map_err(|_| HostError::invalid_argument(operation, "mode out of range")),
        Some(_) => Err(HostError::invalid_argument(operation, "mode must be an integer")),
    }
}

fn id(args: &HostArgs, index: usize, operation: &str) -> HostResult<Option<u32>> {
    match args.get(index) {
        None | Some(HostValue::Undefined) => Ok(None),
        Some(HostValue::Int(-1)) => Ok(None),
        Some(HostValue::Int(value)) => u32::try_from(*value)
            .map(Some)
            .map_err(|_| HostError::invalid_argument(operation, "id out of range")),
        Some(_) => Err(HostError::invalid_argument(operation, "id must be an integer")),
    }
}

fn open_options(flags: &str) -> HostResult<OpenOptions> {
    let mut options = OpenOptions::new();
    match flags {
        "r" => options.read(true),
        "r+" => options.read(true).write(true),
        "w" => options.write(true).create(true).truncate(true),
        "wx" => options.write(true).create_new(true),
        "w+" => options.read(true).write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        "ax" => options.append(true).create_new(true),
        "a+" => options.read(true).append(true).create(true),
        other => {
            return Err(HostError::invalid_argument(
                "open",
                format!("unsupported flags {other:?}"),
            ));
        },
    };
    Ok(options)
}

fn open(args: &HostArgs) -> HostResult<HostValue> {
    let path = path(args, 0, "open")?;
    let flags = match args.get(1) {
        None | Some(HostValue::Undefined) => "r",
        Some(HostValue::Str(flags)) => flags.as_str(),
        Some(_) => return Err(HostError::invalid_argument("open", "flags must be a string")),
    };
    let mut options = open_options(flags)?;
    if let Some(mode) = mode(args, 2, "open")? {
        options.mode(mode);
    }
    Ok(HostValue::File(options.open(path)?))
}

fn rename(args: &HostArgs) -> HostResult<HostValue> {
    fs::rename(path(args, 0, "rename")?, path(args, 1, "rename")?)?;
    Ok(HostValue::Undefined)
}

fn rmdir(args: &HostArgs) -> HostResult<HostValue> {
    fs::remove_dir(path(args, 0, "rmdir")?)?;
    Ok(HostValue::Undefined)
}

fn mkdir(args: &HostArgs) -> HostResult<HostValue> {
    let path = path(args, 0, "mkdir")?;
    let mut builder = DirBuilder::new();
    if let Some(mode) = mode(args, 1, "mkdir")? {
        builder.mode(mode);
    }
    builder.create(path)?;
    Ok(HostValue::Undefined)
}

fn readdir(args: &HostArgs) -> HostResult<HostValue> {
    let mut names = fs::read_dir(path(args, 0, "readdir")?)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(HostValue::List(names.into_iter().map(HostValue::Str).collect()))
}

fn symlink(args: &HostArgs) -> HostResult<HostValue> {
    std::os::unix::fs::symlink(path(args, 0, "symlink")?, path(args, 1, "symlink")?)?;
    Ok(HostValue::Undefined)
}

fn link(args: &HostArgs) -> HostResult<HostValue> {
    fs::hard_link(path(args, 0, "link")?, path(args, 1, "link")?)?;
    Ok(HostValue::Undefined)
}

fn unlink(args: &HostArgs) -> HostResult<HostValue> {
    fs::remove_file(path(args, 0, "unlink")?)?;
    Ok(HostValue::Undefined)
}

fn chmod(args: &HostArgs) -> HostResult<HostValue> {
    let path = path(args, 0, "chmod")?;
    let mode = mode(args, 1, "chmod")?
        .ok_or_else(|| HostError::invalid_argument("chmod", "mode is required"))?;
    fs::set_permissions(path, Permissions::from_mode(mode))?;
    Ok(HostValue::Undefined)
}

fn chown(args: &HostArgs) -> HostResult<HostValue> {
    let path = path(args, 0, "chown")?;
    let uid = id(args, 1, "chown")?;
    let gid = id(args, 2, "chown")?;
    std::os::unix::fs::chown(path, uid, gid)?;
    Ok(HostValue::Undefined)
}

fn readlink(args: &HostArgs) -> HostResult<HostValue> {
    let target = fs::read_link(path(args, 0, "readlink")?)?;
    Ok(HostValue::Str(target.to_string_lossy().into_owned()))
}
