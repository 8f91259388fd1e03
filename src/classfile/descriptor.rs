//! Field and method descriptor parsing.
//!
//! Descriptors use the JVM's compact encoding (`(Ljava/lang/String;I)V`).
//! These helpers convert them to Java source spellings and extract the class
//! names they reference.

use super::error::ClassfileError;

/// All class names referenced by a descriptor, in external (dotted) form.
///
/// Primitives and array dimensions contribute nothing; `[Ljava/lang/String;`
/// yields `java.lang.String`.
pub fn class_names(descriptor: &str) -> Vec<String> {
    let mut result = Vec::new();
    let bytes = descriptor.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'L' {
            if let Some(end) = descriptor[pos..].find(';') {
                result.push(descriptor[pos + 1..pos + end].replace('/', "."));
                pos += end + 1;
                continue;
            }
        }
        pos += 1;
    }
    result
}

fn decode_type(descriptor: &str, pos: usize) -> Result<(String, usize), ClassfileError> {
    let bytes = descriptor.as_bytes();
    match bytes.get(pos) {
        Some(b'B') => Ok(("byte".to_string(), pos + 1)),
        Some(b'C') => Ok(("char".to_string(), pos + 1)),
        Some(b'D') => Ok(("double".to_string(), pos + 1)),
        Some(b'F') => Ok(("float".to_string(), pos + 1)),
        Some(b'I') => Ok(("int".to_string(), pos + 1)),
        Some(b'J') => Ok(("long".to_string(), pos + 1)),
        Some(b'S') => Ok(("short".to_string(), pos + 1)),
        Some(b'Z') => Ok(("boolean".to_string(), pos + 1)),
        Some(b'V') => Ok(("void".to_string(), pos + 1)),
        Some(b'L') => {
            let end = descriptor[pos..]
                .find(';')
                .ok_or_else(|| ClassfileError::BadDescriptor(descriptor.to_string()))?;
            Ok((
                descriptor[pos + 1..pos + end].replace('/', "."),
                pos + end + 1,
            ))
        }
        Some(b'[') => {
            let (inner, next) = decode_type(descriptor, pos + 1)?;
            Ok((format!("{inner}[]"), next))
        }
        _ => Err(ClassfileError::BadDescriptor(descriptor.to_string())),
    }
}

/// Render a single field descriptor as a Java type (`[I` becomes `int[]`).
pub fn field_type(descriptor: &str) -> Result<String, ClassfileError> {
    let (rendered, consumed) = decode_type(descriptor, 0)?;
    if consumed != descriptor.len() {
        return Err(ClassfileError::BadDescriptor(descriptor.to_string()));
    }
    Ok(rendered)
}

/// Render a method descriptor's parameter list, parentheses included
/// (`(Ljava/lang/String;I)V` becomes `(java.lang.String, int)`).
pub fn parameter_list(descriptor: &str) -> Result<String, ClassfileError> {
    if !descriptor.starts_with('(') {
        return Err(ClassfileError::BadDescriptor(descriptor.to_string()));
    }
    let mut parameters = Vec::new();
    let mut pos = 1;
    while descriptor.as_bytes().get(pos) != Some(&b')') {
        let (rendered, next) = decode_type(descriptor, pos)?;
        parameters.push(rendered);
        pos = next;
    }
    Ok(format!("({})", parameters.join(", ")))
}

/// Render a method descriptor's return type.
pub fn return_type(descriptor: &str) -> Result<String, ClassfileError> {
    let close = descriptor
        .rfind(')')
        .ok_or_else(|| ClassfileError::BadDescriptor(descriptor.to_string()))?;
    let (rendered, consumed) = decode_type(descriptor, close + 1)?;
    if consumed != descriptor.len() {
        return Err(ClassfileError::BadDescriptor(descriptor.to_string()));
    }
    Ok(rendered)
}

/// Fully qualified feature name for a member reference.
///
/// Methods get their parameter list appended; constructors are spelled with
/// the class's simple name instead of `<init>`, and static initializers with
/// `<clinit>` keep that spelling.
pub fn feature_name(
    class_name: &str,
    member_name: &str,
    descriptor: &str,
    is_method: bool,
) -> Result<String, ClassfileError> {
    if !is_method {
        return Ok(format!("{class_name}.{member_name}"));
    }
    let display_name = if member_name == "<init>" {
        class_name.rsplit('.').next().unwrap_or(class_name)
    } else {
        member_name
    };
    Ok(format!(
        "{class_name}.{display_name}{}",
        parameter_list(descriptor)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_skips_primitives_and_arrays() {
        assert_eq!(
            class_names("([Ljava/lang/String;IJ[[D)Lfoo/Bar;"),
            vec!["java.lang.String".to_string(), "foo.Bar".to_string()]
        );
        assert!(class_names("(IJ)V").is_empty());
    }

    #[test]
    fn parameter_list_spells_java_types() {
        assert_eq!(
            parameter_list("(Ljava/lang/String;I[J)V").unwrap(),
            "(java.lang.String, int, long[])"
        );
        assert_eq!(parameter_list("()V").unwrap(), "()");
    }

    #[test]
    fn constructor_uses_simple_class_name() {
        assert_eq!(
            feature_name("foo.bar.Baz", "<init>", "(I)V", true).unwrap(),
            "foo.bar.Baz.Baz(int)"
        );
    }
}
