//! Static description of the blocks the extension contributes.
//!
//! Front-ends render the palette from this; opcodes match the methods on
//! [`CloneIds`](crate::CloneIds).

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockType {
    Command,
    Reporter,
    Boolean,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgumentType {
    String,
    Number,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    Number(f64),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArgumentInfo {
    pub name: &'static str,
    pub kind: ArgumentType,
    pub default: DefaultValue,
    /// Name of the menu supplying the choices, if any.
    pub menu: Option<&'static str>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockInfo {
    pub opcode: &'static str,
    pub block_type: BlockType,
    /// Display text; `[NAME]` marks where argument `NAME` is rendered.
    pub text: &'static str,
    pub arguments: &'static [ArgumentInfo],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuInfo {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExtensionInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub color1: &'static str,
    pub color2: &'static str,
    pub color3: &'static str,
    pub blocks: &'static [BlockInfo],
    pub menus: &'static [MenuInfo],
}

impl ExtensionInfo {
    pub fn block(&self, opcode: &str) -> Option<&BlockInfo> {
        self.blocks.iter().find(|block| block.opcode == opcode)
    }

    pub fn menu(&self, name: &str) -> Option<&MenuInfo> {
        self.menus.iter().find(|menu| menu.name == name)
    }
}

impl fmt::Display for BlockInfo {
    /// Renders the block text with default argument values filled in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = self.text.to_owned();
        for arg in self.arguments {
            let value = match arg.default {
                DefaultValue::Text(text) => text.to_owned(),
                DefaultValue::Number(number) => number.to_string(),
            };
            text = text.replace(&format!("[{}]", arg.name), &format!("({value})"));
        }
        f.write_str(&text)
    }
}

pub const PROPERTIES_MENU: &str = "properties";

const ID_ARG: ArgumentInfo = ArgumentInfo {
    name: "ID",
    kind: ArgumentType::Number,
    default: DefaultValue::Number(1.0),
    menu: None,
};

const KEY_ARG: ArgumentInfo = ArgumentInfo {
    name: "KEY",
    kind: ArgumentType::String,
    default: DefaultValue::Text("health"),
    menu: None,
};

pub static EXTENSION_INFO: ExtensionInfo = ExtensionInfo {
    id: "cloneids",
    name: "Clone IDs",
    color1: "#dbd21a",
    color2: "#cfc514",
    color3: "#b8b110",
    blocks: &[
        BlockInfo {
            opcode: "assignCloneID",
            block_type: BlockType::Command,
            text: "assign ID to this clone",
            arguments: &[],
        },
        BlockInfo {
            opcode: "setData",
            block_type: BlockType::Command,
            text: "set data [KEY] to [VAL]",
            arguments: &[
                KEY_ARG,
                ArgumentInfo {
                    name: "VAL",
                    kind: ArgumentType::String,
                    default: DefaultValue::Text("100"),
                    menu: None,
                },
            ],
        },
        BlockInfo {
            opcode: "deleteCloneByID",
            block_type: BlockType::Command,
            text: "delete clone with ID [ID]",
            arguments: &[ID_ARG],
        },
        BlockInfo {
            opcode: "getMyID",
            block_type: BlockType::Reporter,
            text: "ID of myself",
            arguments: &[],
        },
        BlockInfo {
            opcode: "getPropertyOfID",
            block_type: BlockType::Reporter,
            text: "[PROPERTY] of ID [ID]",
            arguments: &[
                ID_ARG,
                ArgumentInfo {
                    name: "PROPERTY",
                    kind: ArgumentType::String,
                    default: DefaultValue::Text("x"),
                    menu: Some(PROPERTIES_MENU),
                },
            ],
        },
        BlockInfo {
            opcode: "idExists",
            block_type: BlockType::Boolean,
            text: "does ID [ID] exist?",
            arguments: &[ID_ARG],
        },
        BlockInfo {
            opcode: "getData",
            block_type: BlockType::Reporter,
            text: "data [KEY] of ID [ID]",
            arguments: &[KEY_ARG, ID_ARG],
        },
        BlockInfo {
            opcode: "getAllIDs",
            block_type: BlockType::Reporter,
            text: "all clone IDs",
            arguments: &[],
        },
    ],
    menus: &[MenuInfo {
        name: PROPERTIES_MENU,
        items: &crate::TargetProperty::MENU,
    }],
};
