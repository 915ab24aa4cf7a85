#![forbid(unsafe_code)]

fn main() {
    // Build metadata surfaced by the /version endpoint.  Only values that
    // can be computed without a git checkout are captured so that builds
    // from source tarballs still succeed.
    build_data::set_RUSTC_VERSION();
    build_data::set_BUILD_TIMESTAMP();
}
