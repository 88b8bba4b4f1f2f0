//! VFS CLI - operate on host files through drive-letter dispatch.
//!
//! Usage:
//!   vfs cat F:/etc/hostname              # Paths pass through to the host
//!   vfs --root data write F:notes.txt hi # Anchor the drive at ./data
//!   vfs stat F:notes.txt                 # Size in bytes
//!   vfs mv F:notes.txt F:old-notes.txt
//!   vfs rm F:old-notes.txt

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vfs_core::{HostDrive, OpenMode, Vfs};

/// Drive-letter VFS tool
#[derive(Parser, Debug)]
#[command(name = "vfs")]
#[command(about = "Operate on files through drive-letter dispatch")]
struct Args {
    /// Anchor the host drive at this directory (default: paths pass through
    /// to the host verbatim)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Drive letter the host backend is registered under
    #[arg(long, default_value_t = 'F')]
    drive: char,

    /// Enable dispatch tracing
    #[arg(short, long)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a file to stdout
    Cat { path: String },
    /// Write text (or stdin when omitted) to a file
    Write { path: String, text: Option<String> },
    /// Print a file's size in bytes
    Stat { path: String },
    /// Delete a file
    Rm { path: String },
    /// Rename a file on its drive
    Mv { old: String, new: String },
}

const READ_CHUNK: u32 = 4096;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let drive = match &args.root {
        Some(root) => HostDrive::rooted(root),
        None => HostDrive::new(),
    };

    let mut vfs = Vfs::new();
    vfs.trace = args.trace;
    vfs.register(args.drive, Box::new(drive))?;

    match args.command {
        Command::Cat { path } => {
            let mut handle = vfs.open(&path, OpenMode::Read)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            loop {
                let chunk = handle.read(READ_CHUNK)?;
                if chunk.is_empty() {
                    break;
                }
                out.write_all(&chunk)?;
            }
            out.flush()?;
            handle.close()?;
        }

        Command::Write { path, text } => {
            let data = match text {
                Some(text) => text.into_bytes(),
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            let mut handle = vfs.open(&path, OpenMode::Write)?;
            let written = handle.write(&data)?;
            handle.close()?;
            eprintln!("{} bytes written to {}", written, path);
        }

        Command::Stat { path } => {
            let mut handle = vfs.open(&path, OpenMode::Read)?;
            println!("{}", handle.size()?);
            handle.close()?;
        }

        Command::Rm { path } => {
            vfs.remove(&path)?;
        }

        Command::Mv { old, new } => {
            vfs.rename(&old, &new)?;
        }
    }

    Ok(())
}
