//! Solidity interfaces used by the built-in actions.

#![allow(missing_docs)]

use alloy::sol;

sol! {
    /// Minimal ERC-20 surface.
    #[derive(Debug)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
        function transfer(address to, uint256 value) external returns (bool);
    }
}

sol! {
    /// LayerZero v2 OFT send parameters.
    #[derive(Debug, PartialEq, Eq)]
    struct SendParam {
        uint32 dstEid;
        bytes32 to;
        uint256 amountLD;
        uint256 minAmountLD;
        bytes extraOptions;
        bytes composeMsg;
        bytes oftCmd;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct MessagingFee {
        uint256 nativeFee;
        uint256 lzTokenFee;
    }

    #[derive(Debug)]
    struct MessagingReceipt {
        bytes32 guid;
        uint64 nonce;
        MessagingFee fee;
    }

    #[derive(Debug)]
    struct OFTReceipt {
        uint256 amountSentLD;
        uint256 amountReceivedLD;
    }

    /// Omnichain fungible token (OFT / OFT adapter) entry points.
    #[derive(Debug)]
    interface IOFT {
        function quoteSend(SendParam calldata sendParam, bool payInLzToken) external view returns (MessagingFee memory fee);
        function send(SendParam calldata sendParam, MessagingFee calldata fee, address refundAddress) external payable returns (MessagingReceipt memory receipt, OFTReceipt memory oftReceipt);
    }
}

sol! {
    /// ENS registry.
    #[derive(Debug)]
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    /// ENS public resolver (address record only).
    #[derive(Debug)]
    interface IEnsResolver {
        function addr(bytes32 node) external view returns (address);
    }
}
