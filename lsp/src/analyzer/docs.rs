//! Short reference texts shown by hover and completion.

use dockerls_core::token::Keyword;

pub(crate) fn keyword_doc(kind: Keyword) -> Option<&'static str> {
    let doc = match kind {
        Keyword::Add => "Copy files, directories or remote URLs from `<src>` into the image at `<dest>`. Archives are unpacked.\n\n```\nADD [--chown=<user>:<group>] [--chmod=<perms>] <src>... <dest>\n```",
        Keyword::Arg => "Declare a variable users can pass at build time with `--build-arg <name>=<value>`.\n\n```\nARG <name>[=<default value>]\n```",
        Keyword::Cmd => "Provide the default command for an executing container. Only the last `CMD` of a stage takes effect.\n\n```\nCMD [\"executable\",\"param1\",\"param2\"]\nCMD command param1 param2\n```",
        Keyword::Copy => "Copy files or directories from `<src>` (or another stage with `--from`) into the image at `<dest>`.\n\n```\nCOPY [--from=<stage>] [--chown=<user>:<group>] <src>... <dest>\n```",
        Keyword::Entrypoint => "Configure the container to run as an executable. Only the last `ENTRYPOINT` of a stage takes effect.\n\n```\nENTRYPOINT [\"executable\", \"param1\"]\n```",
        Keyword::Env => "Set environment variables for the rest of the stage and the running container.\n\n```\nENV <key>=<value> ...\n```",
        Keyword::Expose => "Document the ports the container listens on.\n\n```\nEXPOSE <port>[/<protocol>] ...\n```",
        Keyword::From => "Start a new build stage from a base image.\n\n```\nFROM [--platform=<platform>] <image>[:<tag>] [AS <name>]\n```",
        Keyword::Healthcheck => "Tell Docker how to test that the container is still working.\n\n```\nHEALTHCHECK [--interval=<d>] [--timeout=<d>] [--start-period=<d>] [--retries=<n>] CMD <command>\nHEALTHCHECK NONE\n```",
        Keyword::Label => "Add metadata to the image as key-value pairs.\n\n```\nLABEL <key>=<value> ...\n```",
        Keyword::Maintainer => "Deprecated. Set the author field of the image; use `LABEL maintainer=...` instead.\n\n```\nMAINTAINER <name>\n```",
        Keyword::Onbuild => "Register an instruction to run when this image is used as the base of another build.\n\n```\nONBUILD <INSTRUCTION>\n```",
        Keyword::Run => "Execute a command in a new layer on top of the current image.\n\n```\nRUN <command>\nRUN [\"executable\", \"param1\"]\n```",
        Keyword::Shell => "Override the default shell used for the shell form of commands.\n\n```\nSHELL [\"executable\", \"parameters\"]\n```",
        Keyword::Stopsignal => "Set the system call signal sent to the container to exit.\n\n```\nSTOPSIGNAL <signal>\n```",
        Keyword::User => "Set the user (and optionally group) for the rest of the stage.\n\n```\nUSER <user>[:<group>]\n```",
        Keyword::Volume => "Create mount points for externally mounted volumes.\n\n```\nVOLUME [\"/data\"]\n```",
        Keyword::Workdir => "Set the working directory for following instructions.\n\n```\nWORKDIR /path/to/workdir\n```",
        Keyword::Unknown => return None,
    };
    Some(doc)
}

pub(crate) fn flag_doc(kind: Keyword, flag: &str) -> Option<&'static str> {
    let doc = match (kind, flag) {
        (Keyword::Add | Keyword::Copy, "chown") => "Owner `user:group` of the copied files.",
        (Keyword::Add | Keyword::Copy, "chmod") => "Permission bits of the copied files.",
        (Keyword::Add | Keyword::Copy, "link") => "Copy into an independent layer.",
        (Keyword::Add | Keyword::Copy, "exclude") => "Path pattern to leave out of the copy.",
        (Keyword::Add, "checksum") => "Expected checksum of a remote source.",
        (Keyword::Add, "keep-git-dir") => "Keep the `.git` directory of a Git source.",
        (Keyword::Copy, "from") => "Copy from a previous build stage, named or by index, or an image.",
        (Keyword::Copy, "parents") => "Preserve parent directories of the sources.",
        (Keyword::From, "platform") => "Platform of the base image, such as `linux/amd64`.",
        (Keyword::Healthcheck, "interval") => "Time between checks. Default `30s`.",
        (Keyword::Healthcheck, "timeout") => "Time after which a check is considered failed. Default `30s`.",
        (Keyword::Healthcheck, "start-period") => "Initialization time during which failures do not count. Default `0s`.",
        (Keyword::Healthcheck, "start-interval") => "Time between checks during the start period. Default `5s`.",
        (Keyword::Healthcheck, "retries") => "Consecutive failures needed to report unhealthy. Default `3`.",
        _ => return None,
    };
    Some(doc)
}

pub(crate) fn directive_doc(name: &str) -> Option<&'static str> {
    let doc = match name.to_ascii_lowercase().as_str() {
        "escape" => "Set the character used to escape characters and continue lines. Either `\\` (default) or `` ` ``.\n\n```\n# escape=`\n```",
        "syntax" => "Select the Dockerfile frontend image used by BuildKit.\n\n```\n# syntax=docker/dockerfile:1\n```",
        "check" => "Configure build checks.\n\n```\n# check=skip=<checks>;error=<true|false>\n```",
        _ => return None,
    };
    Some(doc)
}

/// Build arguments Docker defines without a declaration.
pub(crate) const PREDEFINED_ARGS: [&str; 18] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "FTP_PROXY",
    "ftp_proxy",
    "NO_PROXY",
    "no_proxy",
    "ALL_PROXY",
    "all_proxy",
    "TARGETPLATFORM",
    "TARGETOS",
    "TARGETARCH",
    "TARGETVARIANT",
    "BUILDPLATFORM",
    "BUILDOS",
    "BUILDARCH",
    "BUILDVARIANT",
];
