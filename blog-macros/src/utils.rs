use quote::ToTokens;
use syn::{Attribute, Field, FieldsNamed, Token, Type, Visibility, punctuated::Punctuated};

// 拆分属性：返回非 derive 属性与已有 derive 路径
pub(crate) fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs.iter() {
        if attr.path().is_ident("derive") {
            if let Ok(list) =
                attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
            {
                existing.extend(list);
            }
        } else {
            retained.push(attr.clone());
        }
    }
    (retained, existing)
}

// 合并 derive（去重，required 在前）
pub(crate) fn merge_derives(existing: Vec<syn::Path>, required: Vec<syn::Path>) -> Attribute {
    let mut seen = std::collections::HashSet::<String>::new();
    let mut final_list: Vec<syn::Path> = Vec::new();
    for p in required.into_iter().chain(existing) {
        if seen.insert(derive_key(&p)) {
            final_list.push(p);
        }
    }
    syn::parse_quote!(#[derive(#(#final_list),*)])
}

// Serialize 与 serde::Serialize 视为同一个 derive
pub(crate) fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => {
            let ident = last.ident.to_string();
            match ident.as_str() {
                "Serialize" | "Deserialize" => format!("serde::{ident}"),
                _ => ident,
            }
        }
        None => p.to_token_stream().to_string(),
    }
}

pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let (retained, existing) = split_derives(attrs);
    let merged = merge_derives(existing, required);
    *attrs = std::iter::once(merged).chain(retained).collect();
}

/// 确保具名字段结构体以 `name: ty` 字段开头
/// - 字段已存在：沿用原定义，移动到最前；
/// - 字段缺失：按给定可见性与类型新增。
pub(crate) fn ensure_leading_field(
    fields_named: &mut FieldsNamed,
    vis: &Visibility,
    name: &str,
    ty: &Type,
) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    let is_target = |f: &Field| f.ident.as_ref().map(|i| i == name).unwrap_or(false);

    match old_named.iter().find(|f| is_target(f)) {
        Some(existing) => new_named.push(existing.clone()),
        None => {
            let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
            new_named.push(syn::parse_quote! { #vis #ident: #ty });
        }
    }

    for f in old_named.into_iter().filter(|f| !is_target(f)) {
        new_named.push(f);
    }

    fields_named.named = new_named;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_required_first_and_dedups_serde_paths() {
        let existing: Vec<syn::Path> = vec![
            syn::parse_quote!(Serialize),
            syn::parse_quote!(Copy),
            syn::parse_quote!(Clone),
        ];
        let required: Vec<syn::Path> = vec![
            syn::parse_quote!(Clone),
            syn::parse_quote!(serde::Serialize),
        ];
        let attr = merge_derives(existing, required);
        let (_, merged) = split_derives(&[attr]);
        let keys: Vec<String> = merged.iter().map(derive_key).collect();
        assert_eq!(keys, ["Clone", "serde::Serialize", "Copy"]);
    }

    #[test]
    fn leading_field_is_added_when_missing() {
        let mut fields: FieldsNamed = syn::parse_quote!({ title: String, content: String });
        let ty: Type = syn::parse_quote!(PostId);
        let vis: Visibility = syn::parse_quote!(pub);
        ensure_leading_field(&mut fields, &vis, "id", &ty);
        let names: Vec<String> = fields
            .named
            .iter()
            .map(|f| f.ident.as_ref().map(|i| i.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(names, ["id", "title", "content"]);
        assert!(matches!(fields.named[0].vis, Visibility::Public(_)));
    }

    #[test]
    fn leading_field_is_moved_when_present() {
        let mut fields: FieldsNamed = syn::parse_quote!({ title: String, id: u64 });
        let ty: Type = syn::parse_quote!(String);
        ensure_leading_field(&mut fields, &Visibility::Inherited, "id", &ty);
        let first = fields.named.first().map(|f| f.ty.to_token_stream().to_string());
        assert_eq!(first.as_deref(), Some("u64"));
        assert_eq!(fields.named.len(), 2);
    }
}
