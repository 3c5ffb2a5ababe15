// build.rs
fn main() {
    println!("cargo:rerun-if-changed=assets/listing_sift.ico");
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/listing_sift.ico");    // multi-size .ico
        res.set("FileDescription", "Listing Sift");
        res.compile().expect("embed Windows resources");
    }
}
