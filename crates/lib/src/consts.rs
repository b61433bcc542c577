pub const APP_NAME: &str = "nativepack";

/// Project manifest looked up in the project directory.
pub const MANIFEST_FILE: &str = "nativepack.toml";

pub const DEFAULT_BUILD_DIR: &str = "builddir";
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Directory under the build dir holding the clean install tree.
pub const INSTALL_SUBDIR: &str = "install";

/// Environment variable consulted for the build job count.
pub const DEFAULT_JOBS_ENV: &str = "MAKE_NPROCS";

/// Environment variable that overrides the version derived from git.
pub const VERSION_ENV: &str = "NATIVEPACK_VERSION";
