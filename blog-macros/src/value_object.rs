use crate::utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Clone, (Debug 可控), (Default 可控), Serialize, Deserialize, PartialEq, Eq
/// - 参数：`#[value_object(debug = bool, default = bool)]`，均默认 true
/// - 枚举使用 `default = true` 时需自行标注 `#[default]` 变体
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ];

    if cfg.derive_default.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Default));
    }
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}

// -------- parsing --------

struct ValueObjectAttrConfig {
    derive_debug: Option<bool>,
    derive_default: Option<bool>,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            derive_debug: None,
            derive_default: None,
        };
        if input.is_empty() {
            return Ok(cfg);
        }

        let pairs: Punctuated<ValueObjectAttrElem, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for elem in pairs {
            let (slot, key, value) = match elem {
                ValueObjectAttrElem::Debug(b) => (&mut cfg.derive_debug, "debug", b),
                ValueObjectAttrElem::Default(b) => (&mut cfg.derive_default, "default", b),
            };
            if slot.is_some() {
                return Err(syn::Error::new(
                    proc_macro2::Span::call_site(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }
            *slot = Some(value);
        }
        Ok(cfg)
    }
}

enum ValueObjectAttrElem {
    Debug(bool),
    Default(bool),
}

impl Parse for ValueObjectAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        // `default` 是关键字，使用 Ident::parse_any 读取
        let key: syn::Ident = syn::ext::IdentExt::parse_any(input)?;
        let _eq: Token![=] = input.parse()?;
        let lit: syn::LitBool = input.parse()?;
        match key.to_string().as_str() {
            "debug" => Ok(Self::Debug(lit.value())),
            "default" => Ok(Self::Default(lit.value())),
            _ => Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'debug' or 'default'",
            )),
        }
    }
}
