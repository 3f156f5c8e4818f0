//! Page-side stub generation.
//!
//! Page code does not assemble bridge URLs by hand. At construction the
//! bridge generates an initialization script that installs a global object,
//! `window.<public_object_name>`, with one stub function per whitelisted
//! selector. A stub takes the selector's declared parameters in declared
//! order and navigates to the corresponding `scheme://selector?...` URL —
//! exactly the wire format `encoding` parses on the native side.
//!
//! Object and selector names were identifier-validated when the registry
//! was built, so they are spliced into the script verbatim; everything
//! else (parameter names, argument values) goes through either a JS string
//! literal escape here or `encodeURIComponent` at call time.

use crate::capability::CapabilityRegistry;

/// Generate the initialization script for a built registry.
///
/// Injected into every page before its own scripts run.
pub fn build_init_script(registry: &CapabilityRegistry) -> String {
    let object_name = registry.public_object_name();
    let scheme = registry.custom_scheme();

    let mut js = String::from("(function() {\n");
    js.push_str(&format!(
        "  var bridge = window.{object_name} = window.{object_name} || {{}};\n"
    ));
    js.push_str(&format!(
        "  bridge._invoke = function(selector, names, args) {{\n\
         \x20   var query = [];\n\
         \x20   for (var i = 0; i < names.length; i++) {{\n\
         \x20     var value = args[i] == null ? '' : String(args[i]);\n\
         \x20     query.push(encodeURIComponent(names[i]) + '=' + encodeURIComponent(value));\n\
         \x20   }}\n\
         \x20   window.location.href = '{scheme}://' + selector + (query.length ? '?' + query.join('&') : '');\n\
         \x20 }};\n"
    ));

    for capability in registry.capabilities() {
        let selector = &capability.selector;
        let names = capability
            .expected_params
            .iter()
            .map(|name| js_string(name))
            .collect::<Vec<_>>()
            .join(", ");
        js.push_str(&format!(
            "  bridge.{selector} = function() {{ bridge._invoke({lit}, [{names}], arguments); }};\n",
            lit = js_string(selector),
        ));
    }

    js.push_str("})();\n");
    js
}

/// Quote a value as a JS single-quoted string literal.
fn js_string(value: &str) -> String {
    format!(
        "'{}'",
        value
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
    )
}
