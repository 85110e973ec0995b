use noah_buildinfo::{BuildInfo, GitCli, ProcessEnv};

fn main() {
    BuildInfo::collect(&ProcessEnv, &GitCli::new()).emit_cargo_env();
}
