use filebox::config::Config;
use std::path::PathBuf;

#[test]
fn test_config_env_handling() {
    // Both variables are handled in one test so parallel tests cannot race on them
    unsafe {
        std::env::remove_var("LISTEN_HOST");
        std::env::remove_var("SERVE_ROOT");
    }
    let cfg = Config::load(8080);
    assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
    assert_eq!(cfg.root, PathBuf::from("."));

    unsafe {
        std::env::set_var("LISTEN_HOST", "127.0.0.1");
        std::env::set_var("SERVE_ROOT", "/srv/files");
    }
    let cfg = Config::load(3000);
    assert_eq!(cfg.listen_addr, "127.0.0.1:3000");
    assert_eq!(cfg.root, PathBuf::from("/srv/files"));

    unsafe {
        std::env::remove_var("LISTEN_HOST");
        std::env::remove_var("SERVE_ROOT");
    }
}

#[test]
fn test_config_port_in_address() {
    let cfg = Config::load(65535);
    assert!(cfg.listen_addr.ends_with(":65535"));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::load(1);
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg1.root, cfg2.root);
}
