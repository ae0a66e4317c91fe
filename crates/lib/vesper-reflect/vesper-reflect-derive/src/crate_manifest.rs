use std::path::PathBuf;

use toml::{map::Map, Value};

/// Facade crate that re-exports `vesper-reflect` as its `reflect` module.
const FACADE_CRATE: &str = "vesper-facade";

/// Manifest of the crate the derive macro is expanding in.
pub struct CrateManifest {
    manifest: Map<String, Value>,
}

/// Read the manifest of the crate being compiled.
///
/// A missing or unreadable manifest is treated as empty, so the generated
/// paths fall back to the crate name itself.
impl Default for CrateManifest {
    fn default() -> Self {
        let manifest = std::env::var("CARGO_MANIFEST_DIR")
            .ok()
            .map(|dir| PathBuf::from(dir).join("Cargo.toml"))
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|manifest| toml::from_str(&manifest).ok())
            .unwrap_or_default();

        Self { manifest }
    }
}

impl CrateManifest {
    /// Try to find how the crate called `name` (e.g. `vesper_reflect`) is reachable.
    ///
    /// A direct dependency wins, then the facade crate's re-export.
    pub fn try_get_path(&self, name: &str) -> Option<syn::Path> {
        let package = name.replace('_', "-");

        let find_in_deps_func = |deps: &Map<String, Value>| -> Option<syn::Path> {
            if let Some(alias) = Self::dependency_alias(deps, &package) {
                // directly depends on crate
                return Self::parse_str(&alias);
            }

            let facade = Self::dependency_alias(deps, FACADE_CRATE)?;
            let mut path = Self::parse_str::<syn::Path>(&facade)?;
            // strip prefix to access inner crate, e.g. vesper_facade::reflect
            if let Some(module) = name.strip_prefix("vesper_") {
                path.segments.push(Self::parse_str(module)?);
            }
            Some(path)
        };

        ["dependencies", "dev-dependencies"].iter()
            .filter_map(|table| self.manifest.get(*table).and_then(Value::as_table))
            .find_map(find_in_deps_func)
    }

    pub fn get_path_default(name: &str) -> syn::Path {
        Self::default().get_path(name)
    }

    pub fn get_path(&self, name: &str) -> syn::Path {
        self.try_get_path(name)
            // cannot find path in dependencies, assume crate is the current crate
            .unwrap_or_else(|| syn::Path::from(syn::Ident::new(name, proc_macro2::Span::call_site())))
    }

    /// Name under which `package` is visible in code, honoring `package = ".."` renames.
    fn dependency_alias(deps: &Map<String, Value>, package: &str) -> Option<String> {
        deps.iter()
            .find(|(key, dep)| {
                let renamed_from = dep.as_table()
                    .and_then(|table| table.get("package"))
                    .and_then(Value::as_str);
                renamed_from.map_or(key.as_str() == package, |renamed| renamed == package)
            })
            .map(|(key, _)| key.replace('-', "_"))
    }

    fn parse_str<T: syn::parse::Parse>(path: &str) -> Option<T> {
        syn::parse_str(path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(source: &str) -> CrateManifest {
        CrateManifest {
            manifest: toml::from_str(source).unwrap(),
        }
    }

    fn path_string(path: &syn::Path) -> String {
        quote::quote!(#path).to_string().replace(' ', "")
    }

    #[test]
    fn direct_dependency_is_preferred() {
        let manifest = manifest(r#"
            [dependencies]
            vesper-facade = { path = "../facade" }
            vesper-reflect = { path = "../reflect" }
        "#);
        assert_eq!(path_string(&manifest.get_path("vesper_reflect")), "vesper_reflect");
    }

    #[test]
    fn facade_reexport_is_used() {
        let manifest = manifest(r#"
            [dev-dependencies]
            vesper-facade = "0.1"
        "#);
        assert_eq!(path_string(&manifest.get_path("vesper_reflect")), "vesper_facade::reflect");
    }

    #[test]
    fn renamed_dependency_and_fallback() {
        let manifest = manifest(r#"
            [dependencies]
            refl = { package = "vesper-reflect", version = "0.1" }
        "#);
        assert_eq!(path_string(&manifest.get_path("vesper_reflect")), "refl");
        assert_eq!(path_string(&CrateManifest { manifest: Map::new() }.get_path("vesper_reflect")), "vesper_reflect");
    }
}
